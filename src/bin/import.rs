use clap::Parser;
use tracing_subscriber::EnvFilter;

use showmatch_api::{
    config::Config,
    db::{create_pool, run_migrations, PgCatalog},
    services::{ingestion::import_pages, providers::TvMazeProvider},
};

#[derive(Parser)]
#[command(name = "showmatch-import")]
#[command(about = "Import shows, genres and cast/crew from TVMaze into the catalog", long_about = None)]
struct Cli {
    /// First show index page to import
    #[arg(long, default_value_t = 0)]
    from_page: u32,
    /// Last show index page to import (inclusive)
    #[arg(long, default_value_t = 0)]
    to_page: u32,
    /// Import shows and genres only
    #[arg(long)]
    skip_people: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("showmatch_api=info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.to_page < cli.from_page {
        anyhow::bail!("--to-page must not be lower than --from-page");
    }

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    let catalog = PgCatalog::new(pool);
    let source = TvMazeProvider::new(config.tvmaze_api_url.clone());

    let summary = import_pages(
        &source,
        &catalog,
        cli.from_page..=cli.to_page,
        !cli.skip_people,
    )
    .await?;

    println!(
        "Imported {} shows and {} people roles from {} pages ({} failed)",
        summary.shows, summary.people, summary.pages, summary.failed
    );

    Ok(())
}
