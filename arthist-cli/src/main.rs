use arthist_core::config::{normalize_base_url, Config};
use arthist_core::era_index::{aggregate_era, EraCountryIndex};
use arthist_core::thumbnail::ThumbnailResolver;
use arthist_core::timeline::{load_timeline, TimelineItem};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

const PHOTO_PLACEHOLDER: &str = "https://via.placeholder.com/200x200?text=Image+Not+Found";
const ARTWORK_PLACEHOLDER: &str = "https://via.placeholder.com/400x300?text=Image+Not+Found";

/// Print the art history timeline as a plain-text report.
#[derive(Parser)]
#[command(name = "arthist")]
struct Args {
    /// Path to the timeline JSON document.
    #[arg(long, env = "ARTHIST_TIMELINE_PATH")]
    timeline: Option<PathBuf>,

    /// Resolve artist photos and artwork thumbnails.
    #[arg(long)]
    thumbnails: bool,

    /// Base URL of the page summary endpoint.
    #[arg(long, env = "ARTHIST_SUMMARY_BASE_URL")]
    summary_base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    configure_logging();
    let args = Args::parse();

    let mut config = Config::load();
    if let Some(path) = args.timeline {
        config.timeline_path = path;
    }
    if let Some(url) = args.summary_base_url {
        config.summary_base_url = normalize_base_url(&url);
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout_secs = secs;
    }

    let timeline = load_timeline(&config.timeline_path).unwrap_or_else(|e| {
        error!(
            "Failed to load timeline from {}: {e}",
            config.timeline_path.display()
        );
        std::process::exit(1);
    });

    let resolver = if args.thumbnails {
        info!("Resolving thumbnails via {}", config.summary_base_url);
        Some(ThumbnailResolver::from_config(&config).unwrap_or_else(|e| {
            error!("Failed to create thumbnail client: {e}");
            std::process::exit(1);
        }))
    } else {
        None
    };

    println!("Art History Timeline");
    println!();
    for era in &timeline {
        print_era(era, resolver.as_ref()).await;
    }
}

async fn print_era(era: &TimelineItem, resolver: Option<&ThumbnailResolver>) {
    println!("{} [{}]", era.century, era.period);
    println!("  {}", era.description);

    if let Some(index) = aggregate_era(era) {
        print_country_index(&index);
    }

    // Every lookup for the era runs concurrently before anything is printed
    let mut thumbnails = match resolver {
        Some(resolver) => Some(resolver.resolve_era(era).await.into_iter()),
        None => None,
    };

    for movement in &era.art_movements {
        println!();
        println!("  {}", movement.name);
        for group in &movement.countries {
            println!("    {} ({})", group.country, group.artist_count_label());
            for artist in &group.artists {
                println!("      {}: {}", artist.name, artist.painting_title);
                if let Some((photo, artwork)) = thumbnails.as_mut().and_then(|t| t.next()) {
                    println!("        photo:   {}", photo.url_or(PHOTO_PLACEHOLDER));
                    println!("        artwork: {}", artwork.url_or(ARTWORK_PLACEHOLDER));
                }
            }
        }
    }
    println!();
}

fn print_country_index(index: &EraCountryIndex) {
    println!();
    println!("  Notable countries (this era)");
    for country in &index.countries {
        println!("    {}", country.country);
        for artist in &country.artists {
            println!("      - {} ({})", artist.name, artist.movements_label());
        }
    }
}
