use std::sync::Arc;

use clap::Parser;
use moviematch::client::{
    render::render_view, HttpRecommendationClient, ResultsView, SearchRoute,
};
use reqwest::Url;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Get 10 movies and TV series similar to one you love
#[derive(Debug, Parser)]
#[command(name = "moviematch", version)]
struct Cli {
    /// Movie or TV series to find recommendations for; prompts when omitted
    title: Option<String>,

    /// Recommendation endpoint
    #[arg(
        long,
        env = "MOVIEMATCH_SERVICE_URL",
        default_value = "http://127.0.0.1:3000/api/v1/recommendations"
    )]
    service_url: Url,

    /// Key sent to hosted function gateways
    #[arg(long, env = "MOVIEMATCH_API_KEY")]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moviematch=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let input = match cli.title {
        Some(title) => title,
        None => {
            stdout
                .write_all(b"Enter a movie or TV series name: ")
                .await?;
            stdout.flush().await?;
            stdin.next_line().await?.unwrap_or_default()
        }
    };

    let Some(route) = SearchRoute::submit(&input) else {
        eprintln!("Please enter a movie or TV series name.");
        return Ok(());
    };
    tracing::debug!(url = %route.to_url(&cli.service_url), "Navigating to results");

    let mut client = HttpRecommendationClient::new(cli.service_url);
    if let Some(key) = cli.api_key {
        client = client.with_api_key(key);
    }

    let mut view = ResultsView::new(Arc::new(client));
    view.navigate(&route);
    stdout.write_all(render_view(&view).as_bytes()).await?;
    view.load().await;

    loop {
        for notification in view.take_notifications() {
            eprintln!("{}: {}", notification.title, notification.description);
        }
        stdout.write_all(render_view(&view).as_bytes()).await?;
        stdout.flush().await?;

        if !view.can_retry() {
            break;
        }

        let answer = stdin.next_line().await?.unwrap_or_default();
        if !answer.trim().eq_ignore_ascii_case("r") {
            break;
        }
        view.reload().await;
    }

    Ok(())
}
