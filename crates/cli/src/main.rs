// HalBench - Host-side HAL Test Harness
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

mod suite;

use anyhow::Context;
use clap::Parser;
use halbench_config::RunnerConfig;
use halbench_harness::Unity;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "HalBench host-side firmware test runner", long_about = None)]
struct Args {
    /// Path to the runner configuration (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a JSON suite report to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print the final verdict without ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => {
            info!("Loading runner config: {:?}", path);
            RunnerConfig::from_file(path)?
        }
        None => RunnerConfig::default(),
    };

    let color = config.color && !args.no_color && std::io::stdout().is_terminal();
    let json_path = args
        .json
        .clone()
        .or_else(|| config.json_report.as_ref().map(PathBuf::from));

    let mut unity = Unity::new().with_color(color);
    let mut fixture = suite::FirmwareFixture::new();

    info!("Running {} test cases", suite::CASE_COUNT);
    unity.begin(&config.file_label);
    suite::run_all(&mut unity, &mut fixture);
    let failures = unity.end();

    let report = unity.report();
    info!(
        "Suite {}: {} tests, {} failures, {} ignored",
        if report.passed() { "passed" } else { "failed" },
        report.tests,
        report.failures,
        report.ignored
    );

    if let Some(path) = json_path {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write JSON report to {:?}", path))?;
        info!("JSON report written to {:?}", path);
    }

    std::process::exit(i32::try_from(failures).unwrap_or(i32::MAX));
}
