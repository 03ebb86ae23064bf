use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod config;
mod diff;
mod discovery;
mod error;
mod flags;
mod harness;
mod process;
mod report;
mod syntax;
mod transform;

use config::{Cli, Config};
use flags::ApiVersion;
use harness::{Harness, TerminalProgress};
use process::SystemRunner;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = Config::from_cli(Cli::parse());

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `Ok(true)` iff every check of every pair passed.
fn run(config: &Config) -> Result<bool> {
    let runner = SystemRunner;

    let old_flags = flags::resolve(&runner, &config.pkg_config, &config.old_package, ApiVersion::Old)?;
    let new_flags = flags::resolve(&runner, &config.pkg_config, &config.new_package, ApiVersion::New)?;
    let pairs = discovery::discover(&config.tests_dir)?;

    let harness = Harness {
        runner: &runner,
        compiler: &config.compiler,
        tidy: &config.tidy,
        plugin: config.plugin.as_deref(),
        check_prefix: &config.check_prefix,
        old_flags: &old_flags,
        new_flags: &new_flags,
        artifact_dir: &config.tests_dir,
    };
    let mut progress = TerminalProgress {
        color: config.color,
    };
    let result = harness.run(&pairs, &mut progress)?;

    report::write(&config.report, &result)?;
    if let Some(json) = &config.json {
        report::write_json(json, &result)?;
    }
    println!("\nReport written to: {}", config.report.display());

    Ok(!result.any_check_failed())
}
