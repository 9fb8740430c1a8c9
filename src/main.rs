mod cli;

use heic_converter::{
    config, logging,
    pipeline::{Pipeline, RunReport},
    plugin::{self, PluginInput, PluginOutput},
    stash::StashClient,
};
use heic_converter_common::Mode;
use heic_converter_magick::{check_tools, MagickLocator};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = logging::default_filter(cli.verbose);

    match cli.command {
        Commands::Plugin => {
            logging::init_plugin_logging(&env_filter);
            Ok(run_plugin(cli.config.as_deref()))
        }
        Commands::Scan => {
            logging::init_cli_logging(&env_filter);
            run_standalone(Mode::Scan, cli.config.as_deref())
        }
        Commands::Convert => {
            logging::init_cli_logging(&env_filter);
            run_standalone(Mode::Convert, cli.config.as_deref())
        }
        Commands::CheckTools => check_magick(),
        Commands::Validate {
            config: config_path,
        } => {
            logging::init_cli_logging(&env_filter);
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("heic-converter {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

/// Stash entry point. Always prints exactly one JSON result.
fn run_plugin(config_path: Option<&Path>) -> ExitCode {
    let output = match plugin_output(config_path) {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Plugin failed: {:#}", e);
            PluginOutput::Error(format!("{:#}", e))
        }
    };

    output.emit();
    output.exit_code()
}

fn plugin_output(config_path: Option<&Path>) -> Result<PluginOutput> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read plugin input")?;

    let input = match PluginInput::parse(&raw) {
        Ok(input) => input,
        Err(e) => return Ok(PluginOutput::Error(format!("Failed to parse input: {}", e))),
    };

    let config = config::load_plugin_config(config_path);
    Ok(runtime()?.block_on(plugin::run(&input, &config)))
}

fn run_standalone(mode: Mode, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = config::load_config_or_default(config_path)?;

    let host = Arc::new(StashClient::new(
        &config.stash.connection(),
        config.stash.timeout(),
    ));
    tracing::info!("Using Stash at {}", host.url());
    let resolver = Arc::new(MagickLocator::new(config.tools.magick_path.clone()));

    let pipeline = Pipeline::new(host, resolver);
    let report = runtime()?.block_on(pipeline.run(mode))?;

    if let RunReport::Scan { ref candidates } = report {
        for path in candidates {
            println!("{}", path.display());
        }
    }
    println!("{}", report.summary());

    Ok(ExitCode::SUCCESS)
}

fn check_magick() -> Result<ExitCode> {
    println!("Checking ImageMagick...\n");

    let tools = check_tools();

    for tool in &tools {
        let status = if tool.available { "✓" } else { "✗" };
        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }
        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }
        if tool.heic_delegate == Some(false) {
            print!(" [no heic delegate]");
        }

        println!();
    }

    println!();
    match tools.iter().find(|t| t.available) {
        Some(tool) if tool.heic_delegate == Some(false) => println!(
            "{} was found but its build does not list the heic delegate; conversions will fail.",
            tool.name
        ),
        Some(tool) => println!("Conversions will use {}.", tool.name),
        None => println!("ImageMagick not found. Install it (with HEIC support) to convert files."),
    }

    Ok(ExitCode::SUCCESS)
}

fn validate_config(path: Option<&Path>) -> Result<ExitCode> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Stash: {}", config.stash.connection().graphql_url());
            println!("  API key set: {}", config.stash.api_key.is_some());
            println!("  Request timeout: {}s", config.stash.timeout_secs);
            match config.tools.magick_path {
                Some(ref magick) => println!("  ImageMagick: {}", magick.display()),
                None => println!("  ImageMagick: search PATH"),
            }
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Stash: {}", config.stash.connection().graphql_url());
        }
    }

    Ok(ExitCode::SUCCESS)
}
