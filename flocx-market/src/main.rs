use flocx_market::{AppConfig, Cli, Commands};
use flocx_sqlite::Db;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Everything below reports through `tracing`; RUST_LOG picks what is shown.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig { database } = AppConfig::load(&cli)?;

    // Opening the database applies any pending migration.
    let db = Db::open(&database).await?;

    match cli.command {
        Commands::SetupDb => {
            db.setup_db().await?;
            tracing::info!("marketplace tables are in place");
        }
        Commands::DropDb => {
            db.drop_db().await?;
            tracing::info!("dropped marketplace tables");
        }
    }

    Ok(())
}
