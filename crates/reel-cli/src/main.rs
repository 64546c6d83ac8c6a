use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use reel_cli::{Command, Config};
use reel_client::{OpenAIClient, TmdbClient};
use reel_core::traits::EmbeddingProvider;
use reel_core::{
    AppError, BackfillSummary, CatalogService, DbConfig, IngestService, IngestSummary,
    SearchService, TracingReporter,
};
use reel_db::MovieRepository;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    let config = Config::parse();

    if let Err(e) = run(config).await {
        match e.downcast_ref::<AppError>() {
            Some(app_error) => eprintln!("\n❌ {}\n", app_error.user_message()),
            None => eprintln!("\n❌ {:#}\n", e),
        }
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(DbConfig::default().max_connections)
        .connect(&config.database_url)
        .await
        .map_err(AppError::DatabaseError)
        .context("Failed to connect to database")?;

    let repo = MovieRepository::new(pool.clone());

    match &config.command {
        Command::Migrate => migrate(&pool).await?,
        Command::Ingest { page } => {
            let ingest = IngestService::with_config(
                repo,
                embedding_client(&config)?,
                catalog_client(&config)?,
                config.catalog_config(),
            );
            let summary = ingest
                .fetch_and_store_with_progress(*page, &TracingReporter)
                .await?;
            print_ingest_summary(&summary);
        }
        Command::Backfill => {
            // Backfill never calls the catalog, so a missing TMDB key is fine here.
            let catalog = TmdbClient::new(
                config.tmdb_api_key.as_deref().unwrap_or_default(),
                &config.catalog_config(),
            )?;
            let ingest = IngestService::with_config(
                repo,
                embedding_client(&config)?,
                catalog,
                config.catalog_config(),
            );
            let summary = ingest
                .backfill_embeddings_with_progress(&TracingReporter)
                .await?;
            print_backfill_summary(&summary);
        }
        Command::Search { query, filtered } => {
            let search_service = SearchService::new(repo, embedding_client(&config)?);
            search(&search_service, query, *filtered).await?;
        }
        Command::Popular => {
            let catalog = CatalogService::new(catalog_client(&config)?);
            let movies = catalog.popular_movies().await?;
            println!("{}", serde_json::to_string_pretty(&movies)?);
        }
        Command::Grouped => {
            let catalog = CatalogService::new(catalog_client(&config)?);
            let groups = catalog.grouped_by_genre().await?;
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        Command::Stats => show_stats(&repo).await?,
    }

    Ok(())
}

fn embedding_client(config: &Config) -> Result<OpenAIClient, AppError> {
    let client = OpenAIClient::with_config(
        config.require_openai_key()?,
        &config.embedding_model,
        config.openai_endpoint.as_deref(),
    )?;
    info!(
        "Using {} embedding provider ({}, {} dimensions)",
        client.name(),
        client.model(),
        client.dimension()
    );
    Ok(client)
}

fn catalog_client(config: &Config) -> Result<TmdbClient, AppError> {
    TmdbClient::new(config.require_tmdb_key()?, &config.catalog_config())
}

async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    reel_db::apply_schema(pool).await?;
    println!("\n✅ Database schema is up to date\n");
    Ok(())
}

fn print_ingest_summary(summary: &IngestSummary) {
    println!("\n✅ {}\n", summary.message());
    println!("  Saved:    {}", summary.total_saved);
    println!("  Skipped:  {}", summary.skipped);
    println!("  Failed:   {}", summary.failed);
    println!();
}

fn print_backfill_summary(summary: &BackfillSummary) {
    println!("\n✅ {}\n", summary.message());
    println!("  Updated:          {}", summary.total_updated);
    println!("  Already embedded: {}", summary.already_embedded);
    println!("  Failed:           {}", summary.failed);
    println!();
}

async fn search(
    search_service: &SearchService<MovieRepository, OpenAIClient>,
    query: &str,
    filtered: bool,
) -> anyhow::Result<()> {
    info!("Searching for: '{}' (filtered: {})", query, filtered);

    // Both searches rank the same way; filtered hits carry no id or poster.
    let rows: Vec<(String, String, f32)> = if filtered {
        search_service
            .text_search(query)
            .await?
            .into_iter()
            .map(|h| (h.title, h.overview, h.score))
            .collect()
    } else {
        search_service
            .semantic_search(query)
            .await?
            .into_iter()
            .map(|h| (h.title, h.overview, h.score))
            .collect()
    };

    if rows.is_empty() {
        println!("\n🔍 No results found for: \"{}\"\n", query);
        println!("Try:");
        println!("  • Ingesting more pages with: reel ingest --page <n>");
        println!("  • Filling missing embeddings with: reel backfill");
        return Ok(());
    }

    println!("\n🔍 Search Results for: \"{}\"\n", query);
    for (i, (title, overview, score)) in rows.iter().enumerate() {
        println!(
            "{}. {} [{:.0}%] {}",
            i + 1,
            similarity_bar(*score),
            score * 100.0,
            title
        );
        if !overview.is_empty() {
            println!("   📝 {}", truncate_text(overview, 120));
        }
        println!();
    }

    Ok(())
}

fn similarity_bar(score: f32) -> String {
    let filled = ((score * 10.0).floor() as isize).clamp(0, 10) as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(10 - filled))
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() <= max_chars {
        cleaned
    } else {
        let truncated: String = cleaned.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

async fn show_stats(repo: &MovieRepository) -> anyhow::Result<()> {
    let stats = repo.get_stats().await?;

    println!("\n📊 Database Statistics\n");
    println!("  Total movies:          {}", stats.total_movies);
    println!("  With embeddings:       {}", stats.movies_with_embeddings);
    if let Some(last_update) = stats.last_update {
        println!("  Last update:           {}", last_update);
    }
    println!();

    Ok(())
}
