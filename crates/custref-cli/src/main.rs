//! custref CLI - ask for customer references in plain English.

use anyhow::Context;
use clap::Parser;
use custref_cli::commands;
use custref_cli::config::OutputFormat;
use custref_cli::repl;
use custref_cli::setup;
use custref_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_or_init(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let format: OutputFormat = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Some(Command::Config(args)) => {
            commands::execute_config(args, &mut config, &path, &formatter)?;
        }
        Some(Command::Compile(args)) => {
            config.apply_env();
            let agent = setup::build_agent(&config).context("failed to set up the assistant")?;
            commands::execute_compile(args, &agent, &formatter)?;
        }
        Some(Command::Ask(args)) => {
            config.apply_env();
            if args.strict {
                config.agent.surface_store_errors = true;
            }
            warn_if_store_unconfigured(&config, &formatter);
            let agent = setup::build_agent(&config).context("failed to set up the assistant")?;
            commands::execute_ask(args, &agent, &formatter)?;
        }
        None | Some(Command::Chat) => {
            config.apply_env();
            warn_if_store_unconfigured(&config, &formatter);
            let agent = setup::build_agent(&config).context("failed to set up the assistant")?;
            repl::run_chat(&agent, &formatter, config.settings.history_size)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn warn_if_store_unconfigured(config: &Config, formatter: &Formatter) {
    if let Err(e) = config.salesforce.validate() {
        eprintln!("{}", formatter.warning(&e.to_string()));
    }
}
