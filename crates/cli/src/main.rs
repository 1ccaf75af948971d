use anyhow::Context;
use bookstore_app::{modules::books::seed, App};
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookstore", version, about = "Bookstore inventory service")]
struct Cli {
    /// Settings environment (local, staging, production); overrides BOOKSTORE_ENV
    #[arg(long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prepare the record store, seed it and serve HTTP (default)
    Serve,
    /// Create missing tables and exit
    InitDb,
    /// Create missing tables, insert the sample books and exit
    Seed,
    /// Print the resolved settings as JSON
    Config,
}

fn load_settings(env: Option<&str>) -> anyhow::Result<Settings> {
    let settings = match env {
        Some(env) => Settings::load_for(env),
        None => Settings::load(),
    };
    settings.with_context(|| "failed to load bookstore settings")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.env.as_deref())?;

    let command = cli.command.unwrap_or(Command::Serve);

    // `config` writes a JSON document to stdout; keep logs out of it
    if !matches!(command, Command::Config) {
        bookstore_telemetry::init(&settings.telemetry)?;

        tracing::info!(
            env = ?settings.environment,
            db = %settings.database.url,
            command = ?command,
            "bookstore bootstrap starting"
        );
    }

    match command {
        Command::Serve => {
            let app = App::bootstrap(settings).await?;
            tracing::info!("bookstore bootstrap complete");
            app.serve(bookstore_http::shutdown::shutdown_signal()).await?;
        }
        Command::InitDb => {
            let app = App::connect(settings).await?;
            app.prepare_schema().await?;
            println!("schema ready");
            app.close().await?;
        }
        Command::Seed => {
            let app = App::connect(settings).await?;
            app.prepare_schema().await?;
            let report = seed::seed_samples(app.pool())
                .await
                .context("failed to seed sample books")?;
            println!(
                "inserted {}, skipped {}",
                report.inserted, report.skipped
            );
            app.close().await?;
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
