mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hallroute_cli::output::OutputFormat;
use hallroute_cli::terminal::ColorPalette;

use commands::booths::{handle_booths_command, BoothsCommandArgs};
use commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Walking routes through exhibition-hall floor plans")]
struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable ANSI colors even when the terminal supports them.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a route from the entrance through the selected booths.
    Route(RouteCommandArgs),
    /// List the booths on a floor plan.
    Booths(BoothsCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let palette = if cli.no_color {
        ColorPalette::plain()
    } else {
        ColorPalette::detect()
    };

    match &cli.command {
        Command::Route(args) => handle_route_command(args, cli.format, &palette),
        Command::Booths(args) => handle_booths_command(args, cli.format, &palette),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
