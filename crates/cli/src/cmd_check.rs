// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.
//!
//! config → registry → selection → discovery → run → report. Everything
//! before the run is fatal and happens before any file is analyzed.

use std::io::Write;
use std::path::Path;

use termcolor::StandardStream;

use texcheck::checks::{
    ALL, BuiltinSource, CheckSource, DirectorySource, Registry, normalize_ids, resolve,
};
use texcheck::classify::ExtensionClassifier;
use texcheck::cli::{Cli, OutputFormat};
use texcheck::color::resolve_color;
use texcheck::config::{self, Config};
use texcheck::discovery::{DEFAULT_KIND, Discovery, DiscoveryOptions};
use texcheck::error::ExitCode;
use texcheck::output::FormatOptions;
use texcheck::output::json::JsonFormatter;
use texcheck::output::text::{TextFormatter, write_aggregate_error};
use texcheck::runner::{CheckRunner, RunOutcome, RunnerConfig};

/// Run the check command.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    let config = match config::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load(&path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let registry = load_registry(cli, &config, &cwd)?;

    if cli.list_checks {
        list_checks(cli, &registry)?;
        return Ok(ExitCode::Success);
    }

    let default_select = vec![ALL.to_string()];
    let select = normalize_ids(
        cli.select
            .as_deref()
            .or(config.checks.select.as_deref())
            .unwrap_or(&default_select),
    );
    let ignore = normalize_ids(
        cli.ignore
            .as_deref()
            .or(config.checks.ignore.as_deref())
            .unwrap_or_default(),
    );
    let checks = resolve(&select, &ignore, &registry)?;

    let options = DiscoveryOptions {
        kind: cli
            .kind
            .clone()
            .or_else(|| config.files.kind.clone())
            .unwrap_or_else(|| DEFAULT_KIND.to_string()),
        root: cli.root.clone(),
        strict: !cli.no_strict && config.files.strict.unwrap_or(true),
        relative: !cli.absolute && config.files.relative.unwrap_or(true),
        exclude_hidden: !(cli.hidden || config.files.hidden.unwrap_or(false)),
        ..Default::default()
    };
    let classifier = ExtensionClassifier::new();
    let files = Discovery::new(&classifier, options).discover_from(&cwd, &cli.paths)?;
    tracing::debug!(
        "running {} check(s) on {} file(s)",
        checks.len(),
        files.files.len()
    );

    let runner = CheckRunner::new(RunnerConfig {
        jobs: cli.jobs.or(config.run.jobs),
    });
    let outcome = runner.run_file_set(&files, &checks);

    report(cli, &outcome)?;
    Ok(ExitCode::from(&outcome))
}

fn load_registry(cli: &Cli, config: &Config, cwd: &Path) -> anyhow::Result<Registry> {
    let dir = cli
        .checks_dir
        .as_ref()
        .map(|dir| cwd.join(dir))
        .or_else(|| config.checks.dir.clone());

    let source: Box<dyn CheckSource> = match dir {
        Some(dir) => {
            tracing::debug!("loading checks from {}", dir.display());
            Box::new(DirectorySource::new(dir))
        }
        None => Box::new(BuiltinSource),
    };
    Ok(Registry::load(source.as_ref())?)
}

fn list_checks(cli: &Cli, registry: &Registry) -> anyhow::Result<()> {
    match cli.output {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::stdout(resolve_color(), FormatOptions::no_limit());
            formatter.write_check_list(registry)?;
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            JsonFormatter::new(stdout.lock()).write_check_list(registry)?;
        }
    }
    Ok(())
}

fn report(cli: &Cli, outcome: &RunOutcome) -> anyhow::Result<()> {
    match cli.output {
        OutputFormat::Text => {
            let color = resolve_color();
            let options = FormatOptions {
                limit: cli.display_limit(),
            };
            let mut formatter = TextFormatter::stdout(color, options);
            formatter.write_outcome(outcome)?;

            if let Some(error) = outcome.aggregate_error() {
                let mut stdout = formatter.into_inner();
                stdout.flush()?;
                let mut stderr = StandardStream::stderr(color);
                write_aggregate_error(&mut stderr, &error)?;
            }
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            JsonFormatter::new(stdout.lock()).write(outcome)?;
        }
    }
    Ok(())
}
