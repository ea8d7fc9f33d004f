use std::process::exit;

use analysis::Scanner;
use anyhow::Context;
use args::Cli;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::fmt;

mod args;
mod reporter;

fn main() {
    let args = Cli::parse();

    let format = fmt::format()
        .with_ansi(true)
        .without_time()
        .with_level(true)
        .with_target(false)
        .compact();

    let max_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .event_format(format)
        .with_writer(std::io::stderr)
        .init();

    info!("scanning {}", args.classes_dir.display());

    let scanner = Scanner::with_tag_descriptor(args.annotation);
    let violations = scanner
        .scan(&args.classes_dir)
        .with_context(|| format!("scan of {} failed", args.classes_dir.display()));

    let violations = match violations {
        Ok(violations) => violations,
        Err(err) => {
            error!("{:#}", err);
            exit(2);
        }
    };

    if violations.is_empty() {
        info!("no duplicate tags found");
        return;
    }

    reporter::report(&violations);

    if args.fail_on_error {
        exit(1);
    }
}
