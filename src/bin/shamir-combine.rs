// An implementation of key reconstruction from

// Shamir A.,
// How to Share a Secret,
// Communications of the ACM, 22, 1979, pp. 612--613.

// Each input is one JSON share file (one "test case"):
//
// {
//     "keys": { "n": 4, "k": 3 },
//     "1": { "base": "10", "value": "4" },
//     "2": { "base": "2", "value": "111" },
//     ...
// }
//
// n  number of shares in the file
// k  quorum value
//
// Every other key is a share: the key is x (decimal) and the value is
// f(x) written in the given base. The first k shares in the file are
// used; with --verify the rest are checked against the result.

extern crate clap;
use clap::{App, Arg};

use std::io;
use std::process;

use anyhow::{Context, Result};
use num_bigint::{BigInt, Sign};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lagrange_ssss::{CombineOptions, Combiner, JsonShares, Recovery};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Dec,
    Hex,
}

fn init_logging(verbosity: u64) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn format_secret(secret: &BigInt, format: Format) -> String {
    match format {
        Format::Dec => secret.to_string(),
        Format::Hex => {
            let (sign, bytes) = secret.to_bytes_be();
            let digits = hex::encode(bytes);
            if sign == Sign::Minus {
                format!("-{}", digits)
            } else {
                digits
            }
        }
    }
}

fn load(name: Option<&str>) -> Result<JsonShares> {
    match name {
        Some(path) => {
            JsonShares::from_path(path).with_context(|| format!("loading share file {}", path))
        }
        None => {
            let stdin = io::stdin();
            let shares = JsonShares::from_reader(stdin.lock()).context("loading shares from stdin")?;
            Ok(shares)
        }
    }
}

fn run_case(name: Option<&str>, combiner: &Combiner) -> Result<Recovery> {
    let mut shares = load(name)?;
    if let Some(path) = name {
        info!(path, supplied = shares.supplied(), "loaded share file");
    }
    let recovery = combiner
        .combine(&mut shares)
        .with_context(|| format!("combining shares from {}", name.unwrap_or("stdin")))?;
    Ok(recovery)
}

fn report(name: &str, recovery: &Recovery, show_points: bool, format: Format) {
    println!("File: {}", name);
    println!("Number of points (n): {}", recovery.n);
    println!("Points needed (k): {}", recovery.k);
    if show_points {
        for p in &recovery.points {
            println!("Point: x={}, y={}", p.x, p.y);
        }
    }
    if recovery.verified > 0 {
        println!("Extra points verified: {}", recovery.verified);
    }
    println!("The secret (f(0)) is: {}", format_secret(&recovery.secret, format));
}

fn main() -> Result<()> {

    let matches = App::new("shamir-combine")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shamir's Secret Sharing Scheme: exact integer reconstruction")
        .usage("shamir-combine [OPTIONS] [FILE]...\n    cat shares.json | shamir-combine")
        .arg(Arg::with_name("FILE")
             .help("JSON share files, one reconstruction each (default: stdin)")
             .multiple(true)
             .index(1))
        .arg(Arg::with_name("verify")
             .long("verify")
             .help("Check shares beyond the first k against the result"))
        .arg(Arg::with_name("show-points")
             .short("p")
             .long("show-points")
             .help("Print the decoded shares used"))
        .arg(Arg::with_name("format")
             .long("format")
             .takes_value(true)
             .possible_values(&["dec", "hex"])
             .default_value("dec")
             .help("Output format for the secret"))
        .arg(Arg::with_name("verbose")
             .short("v")
             .multiple(true)
             .help("More logging on stderr (repeat for more); RUST_LOG overrides"))
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let format = match matches.value_of("format") {
        Some("hex") => Format::Hex,
        _ => Format::Dec,
    };
    let combiner = Combiner::new(CombineOptions { verify: matches.is_present("verify") });
    let show_points = matches.is_present("show-points");

    let files: Vec<Option<&str>> = match matches.values_of("FILE") {
        Some(values) => values.map(Some).collect(),
        None => vec![None],
    };

    let mut failures = 0;
    for (case, name) in files.iter().enumerate() {
        println!("\n========== Test Case {} ==========", case + 1);
        match run_case(*name, &combiner) {
            Ok(recovery) => report(name.unwrap_or("<stdin>"), &recovery, show_points, format),
            Err(e) => {
                error!("{:#}", e);
                println!("Failed: {:#}", e);
                failures += 1;
            }
        }
        println!("====================================");
    }

    if failures > 0 {
        process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_output() {
        assert_eq!(format_secret(&BigInt::from(255), Format::Hex), "ff");
        assert_eq!(format_secret(&BigInt::from(-4096), Format::Hex), "-1000");
        assert_eq!(format_secret(&BigInt::from(4096), Format::Dec), "4096");
    }
}
