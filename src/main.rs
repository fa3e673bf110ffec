//! `muhash` command line tool
//!
//! Adds (or removes) hex-encoded elements to a MuHash and prints the digest.
//!
//! ```bash
//! # Hash two elements given on the command line
//! muhash 00 01
//!
//! # Read one hex element per line from stdin, keep the state in a file
//! cat elements.txt | muhash --save state.json
//!
//! # Resume from a checkpoint and remove an element
//! muhash --checkpoint state.json --save state.json --remove 01
//! ```

use anyhow::{bail, Context, Result};
use rolling_accumulator::{load_checkpoint, save_checkpoint, Checkpoint, MuHash};
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct Options {
    checkpoint: Option<PathBuf>,
    save: Option<PathBuf>,
    remove: bool,
    elements: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--checkpoint" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--checkpoint needs a file argument");
                };
                options.checkpoint = Some(PathBuf::from(path));
                i += 2;
            }
            "--save" | "-s" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--save needs a file argument");
                };
                options.save = Some(PathBuf::from(path));
                i += 2;
            }
            "--remove" | "-r" => {
                options.remove = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => {
                options.elements.push(other.to_string());
                i += 1;
            }
        }
    }

    Ok(Some(options))
}

fn read_stdin_elements() -> Result<Vec<String>> {
    let mut elements = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            elements.push(line.to_string());
        }
    }
    Ok(elements)
}

/// Loads the starting state, applies every element and writes the checkpoint
/// if asked to. Returns the accumulator with its running counters.
fn apply_elements(options: &Options) -> Result<(MuHash, u64, u64)> {
    let (mut muhash, mut added, mut removed) = match &options.checkpoint {
        Some(path) => {
            let checkpoint = load_checkpoint(path)?;
            (
                checkpoint.restore()?,
                checkpoint.elements_added,
                checkpoint.elements_removed,
            )
        }
        None => (MuHash::new(), 0, 0),
    };

    for (n, text) in options.elements.iter().enumerate() {
        let data = hex::decode(text).with_context(|| format!("element #{} is not hex", n))?;
        if options.remove {
            muhash.remove(&data);
            removed += 1;
        } else {
            muhash.add(&data);
            added += 1;
        }
    }
    log::info!(
        "{} {} element(s); totals +{} / -{}",
        if options.remove { "removed" } else { "added" },
        options.elements.len(),
        added,
        removed
    );

    if let Some(path) = &options.save {
        save_checkpoint(&Checkpoint::capture(&muhash, added, removed), path)?;
    }

    Ok((muhash, added, removed))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(mut options) = parse_args(&args)? else {
        return Ok(());
    };

    if options.elements.is_empty() {
        options.elements = read_stdin_elements()?;
    }

    let (muhash, _, _) = apply_elements(&options)?;
    println!("{}", muhash.finalize());
    Ok(())
}

fn print_help() {
    println!("muhash - rolling multiset hash");
    println!();
    println!("USAGE:");
    println!("    muhash [OPTIONS] [HEX_ELEMENT ...]");
    println!();
    println!("Without elements, one hex element per line is read from stdin.");
    println!();
    println!("OPTIONS:");
    println!("    -c, --checkpoint <FILE>    Start from a saved checkpoint");
    println!("    -s, --save <FILE>          Write the resulting checkpoint");
    println!("    -r, --remove               Remove the elements instead of adding them");
    println!("    -h, --help                 Print this help message");
}
