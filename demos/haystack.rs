//! Example: answering substring and suffix queries against a haystack.
//!
//! Builds the suffix automaton of the first argument and reports, for every
//! further argument, whether it is a substring and whether it is a suffix.
//! Without arguments a small built-in haystack and needle set is used.
//!
//! Run with: cargo run --example haystack -- "hello world" lo world hello

use std::env;
use std::process::ExitCode;

use suffix_dawg::dawg::{build_dawg, Config, Dawg};

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

fn report(dawg: &Dawg, needles: &[String]) {
    println!("{:<16} {:<7} {:<7}", "needle", "substr", "suffix");
    for needle in needles {
        println!(
            "{:<16} {:<7} {:<7}",
            format!("{needle:?}"),
            yes_no(dawg.substr(needle)),
            yes_no(dawg.suffix(needle)),
        );
    }
}

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let (haystack, needles): (String, Vec<String>) = match args.next() {
        Some(haystack) => (haystack, args.collect()),
        None => (
            "hello world".to_string(),
            ["", "hello world", "lo wor", "HELLO", "world", "d", "hello", "worlds"]
                .map(String::from)
                .to_vec(),
        ),
    };

    let dawg = match build_dawg(&haystack, Config::new().with_early_exit(true)) {
        Ok(dawg) => dawg,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Haystack: {haystack:?}");
    println!(
        "States: {} ({} terminal), distinct substrings: {}\n",
        dawg.state_count(),
        dawg.terminals().count(),
        dawg.distinct_substring_count()
    );
    report(&dawg, &needles);
    ExitCode::SUCCESS
}
