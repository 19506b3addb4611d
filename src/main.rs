use clap::Parser;
use miette::Result;
use tracing_subscriber::{fmt, EnvFilter};

use docmdx::cli::{log_filter, Cli, Commands};
use docmdx::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let printer = Printer::new();
    let manifest = cli.manifest.as_deref();

    match cli.command {
        Commands::Convert(args) => docmdx::cli::convert::run(args, manifest, &printer)?,
        Commands::Validate(args) => docmdx::cli::validate::run(args, manifest, &printer)?,
        Commands::Init(args) => docmdx::cli::init::run(args, &printer)?,
        Commands::Completions(args) => docmdx::cli::completions::run(args)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
