// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use ghselect_app::run_selection;
use ghselect_cache::{CACHE_FILE_NAME, CacheStore, DataProvider, FileSlot, FixedCacheDir};
use ghselect_gh::GhClient;
use ghselect_tui::TerminalChooser;
use runtime::{GhRuntime, SystemHost, execute_outcome};
use std::env;
use std::io;
use std::path::PathBuf;

const LOG_ENV: &str = "GH_SELECT_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() {
    init_logging();
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let fallback = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let _ = env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, fallback))
        .format_timestamp(None)
        .try_init();
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1))?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    let config_path = match &options.config_path {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    if options.print_config_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&config_path));
        return Ok(());
    }

    let config = Config::load(&config_path).with_context(|| {
        format!(
            "load config {}; run `gh-select --print-example-config` to generate a v1 template",
            config_path.display()
        )
    })?;

    let cache_dir = config.cache_dir()?;
    if options.print_cache_path {
        println!("{}", cache_dir.join(CACHE_FILE_NAME).display());
        return Ok(());
    }

    let client = GhClient::new(config.gh_path())
        .with_context(|| format!("invalid [fetch] config in {}", config_path.display()))?;
    let cache = CacheStore::new(FileSlot::resolve(&FixedCacheDir::new(&cache_dir))?)
        .with_ttl(config.cache_ttl()?);
    let use_cache = config.cache_enabled() && !options.no_cache;
    log::debug!(
        "cache {} (reads {})",
        cache_dir.display(),
        if use_cache { "enabled" } else { "disabled" }
    );

    let mut provider = DataProvider::new(GhRuntime::new(client.clone()), cache);
    let dataset = provider.get(config.fetch_limit(), use_cache)?;

    let outcome = run_selection(&dataset.repositories, &mut TerminalChooser)?;
    execute_outcome(&outcome, &mut SystemHost::new(client), &mut io::stdout().lock())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    /// `None` means the default location, resolved only when needed.
    config_path: Option<PathBuf>,
    no_cache: bool,
    print_config_path: bool,
    print_cache_path: bool,
    print_example: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: None,
        no_cache: false,
        print_config_path: false,
        print_cache_path: false,
        print_example: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--no-cache" | "-n" => {
                options.no_cache = true;
            }
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-cache-path" => {
                options.print_cache_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("gh-select: interactive GitHub repository selector");
    println!("  -n, --no-cache           Skip reading the repository cache (it is still refreshed)");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-cache-path       Print resolved cache file path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  -h, --help               Show this help");
}
