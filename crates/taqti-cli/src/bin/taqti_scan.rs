// taqti-scan: scan romanized Urdu phrases against a meter pattern.
//
// Reads phrases from the command line or from stdin (one per line) and
// prints every way each phrase realizes the meter: the weight string and
// the per-span IPA transcription.
//
// Usage:
//   taqti-scan [OPTIONS] METER [PHRASE...]
//
// Options:
//   --count N[,N...]   Accept only scans with this metrical count
//   -h, --help         Print help

use std::io::{self, BufRead};
use std::process;

use taqti_urdu::MeterScanner;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if taqti_cli::wants_help(&args) || args.is_empty() {
        println!("taqti-scan: scan romanized Urdu phrases against a meter.");
        println!();
        println!("Usage: taqti-scan [OPTIONS] METER [PHRASE...]");
        println!();
        println!("The meter pattern uses `=` (long) and `-` (short) weights,");
        println!("`[...]` required groups, `(...)` optional groups, a trailing");
        println!("`+` for repeatable groups and `|` for alternatives.");
        println!();
        println!("If PHRASE arguments are given, scans each phrase.");
        println!("Otherwise reads phrases from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  --count N[,N...]   Accept only scans with this metrical count");
        println!("  -h, --help         Print this help");
        return;
    }

    let mut count = None;
    let mut positional: Vec<String> = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--count" {
            let Some(value) = args.get(i + 1) else {
                eprintln!("taqti-scan: --count requires a value");
                process::exit(2);
            };
            match taqti_cli::parse_count(value) {
                Ok(target) => count = Some(target),
                Err(e) => {
                    eprintln!("taqti-scan: {e}");
                    process::exit(2);
                }
            }
            skip_next = true;
        } else {
            positional.push(arg.clone());
        }
    }

    let Some((meter, phrases)) = positional.split_first() else {
        eprintln!("taqti-scan: missing METER argument");
        process::exit(2);
    };

    let mut scanner = match MeterScanner::new(meter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("taqti-scan: {e}");
            process::exit(2);
        }
    };
    scanner.set_count(count);

    if phrases.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        scan_one(&scanner, line.trim());
                    }
                }
                Err(e) => {
                    eprintln!("taqti-scan: read error: {e}");
                    process::exit(1);
                }
            }
        }
    } else {
        for phrase in phrases {
            scan_one(&scanner, phrase);
        }
    }
}

fn scan_one(scanner: &MeterScanner, phrase: &str) {
    println!("{phrase}");
    match scanner.scan_phrase(phrase) {
        Ok(results) if results.is_empty() => {
            println!("  (no scan)");
        }
        Ok(results) => {
            for result in results {
                let ipa: String = result.matches.iter().map(|m| m.ipa.as_str()).collect();
                println!("  {}  {}", result.scan, ipa.trim_end());
            }
        }
        Err(e) => {
            eprintln!("taqti-scan: {e}");
        }
    }
}
