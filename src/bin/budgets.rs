use clap::Parser;
use budget_sync::cli::{utils::output_error, Cli, OutputFormat};
use budget_sync::error::ValidationError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Diagnostics go to stderr so stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = budget_sync::cli::run(cli).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => {
                let code = e.downcast_ref::<ValidationError>().map(ValidationError::code);
                match output_format {
                    OutputFormat::Json => output_error(&mut std::io::stdout(), &output_format, &e.to_string(), code)?,
                    OutputFormat::Text => output_error(&mut std::io::stderr(), &output_format, &e.to_string(), code)?,
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
