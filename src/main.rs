use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use widget_loader::cli::commands::{CommandContext, cmd_load, cmd_render_pricing, cmd_submit};
use widget_loader::cli::config::{Cli, Commands, build_loader_settings, load_config};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    // Resolve endpoints: CLI > config > defaults
    let ctx = CommandContext {
        settings: build_loader_settings(&config, cli.api_base.as_deref(), cli.static_base.as_deref()),
        timeout: Duration::from_secs(config.api.timeout_secs),
        trace_file: cli.trace_file.clone(),
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Load {
            page,
            url,
            variant,
            output,
        } => {
            cmd_load(&ctx, &page, &url, &variant, output.as_deref())?;
        }
        Commands::Submit {
            page,
            url,
            values,
            bot_token,
            output,
        } => {
            let submitted = cmd_submit(&ctx, &page, &url, &values, bot_token.as_deref(), output.as_deref())?;
            if !submitted {
                std::process::exit(1);
            }
        }
        Commands::RenderPricing { input, output } => {
            cmd_render_pricing(&input, output.as_deref())?;
        }
    }

    Ok(())
}
