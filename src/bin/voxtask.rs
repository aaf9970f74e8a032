use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::env;
use std::io::Read;
use std::path::PathBuf;

use voxtask::cli::print_help;
use voxtask::config::RuleSet;
use voxtask::engine::TaskExtractor;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut now: Option<NaiveDateTime> = None;
    let mut rules_path: Option<PathBuf> = None;
    let mut pretty = false;
    let mut verbose = false;
    let mut transcript_args: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" | "help" => {
                print_help("voxtask");
                return Ok(());
            }
            "--now" | "-n" => {
                let value = args
                    .get(i + 1)
                    .context("--now requires a datetime argument")?;
                now = Some(parse_reference(value)?);
                i += 2;
            }
            "--rules" | "-r" => {
                let value = args.get(i + 1).context("--rules requires a file path")?;
                rules_path = Some(PathBuf::from(value));
                i += 2;
            }
            "--pretty" | "-p" => {
                pretty = true;
                i += 1;
            }
            "--verbose" | "-v" => {
                verbose = true;
                i += 1;
            }
            other => {
                transcript_args.push(other.to_string());
                i += 1;
            }
        }
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let transcript = if transcript_args.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read transcript from stdin")?;
        buf
    } else {
        transcript_args.join(" ")
    };

    let extractor = match rules_path {
        Some(path) => TaskExtractor::with_rules(RuleSet::load(&path)?),
        None => TaskExtractor::new(),
    };

    let tasks = match now {
        Some(reference) => extractor.extract_at(&transcript, reference)?,
        None => extractor.extract(&transcript)?,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&tasks)?
    } else {
        serde_json::to_string(&tasks)?
    };
    println!("{}", json);

    Ok(())
}

fn parse_reference(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
        .with_context(|| {
            format!(
                "Invalid --now value '{}' (expected e.g. 2024-01-10T09:00:00)",
                value
            )
        })
}
