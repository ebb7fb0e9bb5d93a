use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_kernel::settings::Settings;

/// Libris book catalogue and news proxy
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print the OpenAPI document to stdout
    Openapi {
        /// Emit a single line instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let settings = Settings::load().with_context(|| "failed to load Libris settings")?;
            libris_telemetry::init(&settings.telemetry)?;
            libris_app::serve(settings).await
        }
        Command::Openapi { compact } => {
            let doc = libris_app::openapi::document();
            let rendered = if compact {
                serde_json::to_string(&doc)
            } else {
                serde_json::to_string_pretty(&doc)
            }
            .context("failed to render OpenAPI document")?;
            println!("{rendered}");
            Ok(())
        }
    }
}
