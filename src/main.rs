use clap::Parser;
use form_autofill::cli::commands::{
    FillArgs, cmd_classify, cmd_count, cmd_fill, cmd_locales, cmd_options,
};
use form_autofill::cli::config::{Cli, Commands, FillOverrides, load_config, resolve_settings_path};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let settings_path = resolve_settings_path(cli.settings.as_deref(), &config);

    match cli.command {
        Commands::Fill {
            page,
            locale,
            required_only,
            ignore_validation,
            speed,
            seed,
            output,
            trace,
            format,
        } => {
            let args = FillArgs {
                page,
                overrides: FillOverrides {
                    locale,
                    required_only,
                    ignore_validation,
                    speed,
                },
                seed,
                output,
                trace,
                format,
            };
            let summary = cmd_fill(&args, &config, &settings_path)?;
            if summary.failed_count() > 0 {
                std::process::exit(1);
            }
        }
        Commands::Count { page } => {
            cmd_count(&page, cli.verbose)?;
        }
        Commands::Classify {
            name,
            id,
            placeholder,
            input_type,
        } => {
            cmd_classify(&name, &id, &placeholder, &input_type);
        }
        Commands::Locales => cmd_locales(),
        Commands::Options { action } => {
            cmd_options(&action, &settings_path)?;
        }
    }

    Ok(())
}

// RUST_LOG wins over -v.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
