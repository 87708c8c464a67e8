use clap::Parser;
use raii::{Commands, DemoSettings, OutputFormat};
use raii_core::{RAII_DEMO_FORMAT_VAR, RAII_DEMO_INITIAL_VAR};

#[derive(Parser)]
#[command(name = "raii-demo")]
#[command(about = "Scoped resources with ordered, exactly-once cleanup", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format for the report
    #[arg(long, value_enum, env = RAII_DEMO_FORMAT_VAR, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Value stored by the basic scenario
    #[arg(
        long,
        env = RAII_DEMO_INITIAL_VAR,
        default_value_t = raii::settings::DEFAULT_INITIAL,
        allow_negative_numbers = true
    )]
    initial: i32,

    /// Value of the outer resource in the nested scenario
    #[arg(long, default_value_t = raii::settings::DEFAULT_BASE, allow_negative_numbers = true)]
    base: i32,

    /// Interleave cleanup events with the text output
    #[arg(long)]
    show_cleanups: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    raii_scope::logging::init().map_err(|e| eyre::eyre!(e))?;

    let cli = Cli::parse();
    let settings = DemoSettings::new(cli.format, cli.initial, cli.base, cli.show_cleanups)?;

    // Default behavior when no command is specified
    let command = cli.command.unwrap_or(Commands::All);
    let report = command.execute(&settings);

    print!("{}", report.render(settings.format, settings.show_cleanups)?);
    Ok(())
}
