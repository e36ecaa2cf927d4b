use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;
use log::{error, LevelFilter};

use gamepulse::cli::args::{Cli, Commands, CompletionsArgs};
use gamepulse::cli::commands;
use gamepulse::config::{Config, Paths};
use gamepulse::error::PulseError;
use gamepulse::logging::level_for;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    // A .env next to the working directory may carry YOUTUBE_API_KEY
    dotenvy::dotenv().ok();

    if let Err(e) = run() {
        if log::max_level() == LevelFilter::Off {
            eprintln!("{}: {}", "error".red().bold(), e);
        } else {
            error!("{e}");
        }
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), PulseError> {
    let cli = Cli::parse();
    let format = cli.output;
    let level = level_for(cli.verbose, cli.quiet);

    // Handle completions command early (no config needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let paths = Paths::resolve(cli.config.as_deref())?;
    let config = Config::load_from(&paths)?;

    let output = match &cli.command {
        Commands::Run => commands::run(&config, level)?,
        Commands::Once => commands::once(&config, level, format)?,
        Commands::Targets => commands::targets(&config, format)?,
        Commands::Cache(args) => commands::cache(&config, args, format)?,
        Commands::Config(args) => commands::config(&config, &paths, args, format)?,
        Commands::Completions(_) => unreachable!(), // Handled above
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
