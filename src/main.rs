use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use broadsheet::app::AppContext;
use broadsheet::cli::{commands, Cli, Commands};
use broadsheet::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(&config, cli.offline)?;

    match cli.command {
        Commands::Feed { category } => {
            commands::list_feed(&ctx, category.as_deref()).await?;
        }
        Commands::Categories => {
            commands::list_categories(&ctx).await?;
        }
        Commands::Read { id, share } => {
            commands::read_article(&ctx, &id, share).await?;
        }
        Commands::Render { path } => {
            commands::render_file(&ctx, &path)?;
        }
        Commands::Tui => {
            broadsheet::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
    }

    Ok(())
}
