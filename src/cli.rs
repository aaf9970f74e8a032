// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Voxtask v{} - Task and reminder extraction for voice transcripts",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] [transcript...]", binary_name);
    println!("    echo \"call mom at 5pm\" | {} [OPTIONS]", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -n, --now <datetime>    Reference instant for relative expressions");
    println!("                            (e.g. 2024-01-10T09:00:00). Defaults to the");
    println!("                            current local time.");
    println!("    -r, --rules <path>      Load rule tables from a TOML file.");
    println!("    -p, --pretty            Pretty-print the JSON output.");
    println!("    -v, --verbose           Log segmentation decisions to stderr.");
    println!("    -h, --help              Show this help message.");
    println!();
    println!("OUTPUT:");
    println!("    A JSON array of extracted tasks:");
    println!("    [{{\"text\": \"Call mom\",");
    println!("      \"reminder_time\": \"2024-01-10T17:00:00\",");
    println!("      \"original_time_text\": \"at 5pm\"}}]");
    println!();
    println!("    Both time fields are null when no time expression was found.");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} \"call mom at 5pm and then pick up groceries tomorrow morning\"",
        binary_name
    );
    println!(
        "    {} --now 2024-01-10T09:00:00 \"meeting friday at 3pm\"",
        binary_name
    );
    println!("    {} --rules my_rules.toml < transcript.txt", binary_name);
}
