use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kino_client::{ApiClient, ClientConfig, browse, genres};
use kino_core::query::{ContentTypeFilter, QuerySpecBuilder, SortKey};
use kino_core::{PlaybackProgressReporter, PlayerEvent, ResultPage, SessionHandle};
use kino_model::watch::whole_seconds;
use kino_model::{MediaId, MediaItem, MediaTitle, ProgressReport};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kino", about = "Kino streaming service client")]
struct Cli {
    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Override the viewer id
    #[arg(long, global = true)]
    viewer: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search, filter and page through the catalog
    Browse {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "All")]
        genre: String,
        #[arg(long = "type", default_value = "all")]
        content_type: ContentTypeFilter,
        #[arg(long, default_value = "title")]
        sort: SortKey,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Defaults to the configured page size
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// List the genres present in the catalog
    Genres,
    /// List the viewer's favorites
    Favorites,
    /// List the viewer's watch history
    History,
    /// Add or remove a favorite
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Show the viewer's subscription plan
    Subscription,
    /// Send a single progress report
    Report { media_id: String, seconds: f64 },
    /// Simulate playback of one title, reporting progress until the
    /// duration elapses or Ctrl-C is pressed
    Play {
        media_id: String,
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// Seconds of playback to simulate
        #[arg(long, default_value_t = 120)]
        duration: u64,
    },
    /// Print the effective configuration
    Config {
        /// Write it to the default config location
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    Add { title: String },
    Remove { title: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load().context("loading configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(viewer) = cli.viewer {
        config.viewer_id = Some(viewer);
    }

    let client =
        ApiClient::from_config(&config).context("creating API client")?;

    match cli.command {
        Command::Browse {
            search,
            genre,
            content_type,
            sort,
            page,
            page_size,
        } => {
            let spec = QuerySpecBuilder::new()
                .search(search)
                .genre(genre)
                .content_type(content_type)
                .sort_by(sort)
                .page(page)
                .page_size(page_size.unwrap_or(config.page_size))
                .build();
            let result = browse(&client, &spec)
                .await
                .context("browsing the catalog")?;
            print_page(&result);
        }
        Command::Genres => {
            for genre in genres(&client).await.context("fetching genres")? {
                println!("{genre}");
            }
        }
        Command::Favorites => {
            let viewer = config.viewer()?;
            let items = client
                .fetch_favorites(&viewer)
                .await
                .context("fetching favorites")?;
            print_items(&items);
        }
        Command::History => {
            let viewer = config.viewer()?;
            let items = client
                .fetch_history(&viewer)
                .await
                .context("fetching watch history")?;
            print_items(&items);
        }
        Command::Favorite { action } => {
            let viewer = config.viewer()?;
            match action {
                FavoriteAction::Add { title } => {
                    let title = MediaTitle::new(title)?;
                    client
                        .add_favorite(&viewer, &title)
                        .await
                        .with_context(|| format!("adding '{title}'"))?;
                    println!("Added '{title}' to favorites");
                }
                FavoriteAction::Remove { title } => {
                    let title = MediaTitle::new(title)?;
                    client
                        .remove_favorite(&viewer, &title)
                        .await
                        .with_context(|| format!("removing '{title}'"))?;
                    println!("Removed '{title}' from favorites");
                }
            }
        }
        Command::Subscription => {
            let viewer = config.viewer()?;
            match client
                .fetch_subscription(&viewer)
                .await
                .context("fetching subscription")?
            {
                Some(plan) => {
                    println!("{} ({})", plan.name, plan.status);
                    if let Some(renews_at) = plan.renews_at {
                        println!("Renews {}", renews_at.format("%Y-%m-%d"));
                    }
                }
                None => println!("No active subscription"),
            }
        }
        Command::Report { media_id, seconds } => {
            let viewer = config.viewer()?;
            let Some(position) = whole_seconds(seconds) else {
                bail!("position must be a non-negative number of seconds");
            };
            let report =
                ProgressReport::new(viewer, MediaId::new(media_id)?, position);
            client
                .update_progress(&report)
                .await
                .context("sending progress report")?;
            println!("Reported {}s for {}", position, report.media_id);
        }
        Command::Play {
            media_id,
            from,
            duration,
        } => {
            let viewer = config.viewer()?;
            let reporter = PlaybackProgressReporter::new(
                Arc::new(client),
                viewer,
                MediaId::new(media_id)?,
                config.reporter_config(),
            );
            play(reporter, from, duration).await?;
        }
        Command::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if save {
                let path = config.save_default()?;
                println!("Saved to {}", path.display());
            }
        }
    }

    Ok(())
}

/// Feed one time update per second into a session until `duration`
/// elapses or the process is interrupted. Either way the session is closed,
/// which delivers the final position.
async fn play(
    reporter: PlaybackProgressReporter,
    from: f64,
    duration: u64,
) -> Result<()> {
    let session = SessionHandle::attach(reporter, 16);
    let teardown = session.teardown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            teardown.cancel();
        }
    });

    if from > 0.0 {
        session.send(PlayerEvent::Seeked(from)).await?;
    }
    session.send(PlayerEvent::Play).await?;

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    for elapsed in 0..=duration {
        ticker.tick().await;
        if session
            .send(PlayerEvent::TimeUpdate(from + elapsed as f64))
            .await
            .is_err()
        {
            break;
        }
    }
    session.send(PlayerEvent::Ended).await.ok();

    if let Some(reporter) = session.close().await {
        info!(position = reporter.position(), "playback finished");
    }
    Ok(())
}

fn print_items(items: &[MediaItem]) {
    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        println!(
            "{:<12} {:<40} {:<7} {}",
            item.id.as_str(),
            item.title.as_str(),
            item.content_type.api_name(),
            item.genres.join(", ")
        );
    }
}

fn print_page(page: &ResultPage) {
    print_items(&page.items);
    let p = &page.pagination;
    println!(
        "page {}/{} ({} results){}{}",
        p.current_page,
        p.total_pages,
        p.total_results,
        if p.has_previous_page { " [prev]" } else { "" },
        if p.has_next_page { " [next]" } else { "" },
    );
}
