//! Watchlist Picker
//!
//! Headless driver: builds the home page, asks the content server for one
//! random pick and prints what the result container ends up showing.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use watchlist_picker::catalog::Catalog;
use watchlist_picker::client::ContentClient;
use watchlist_picker::config::Config;
use watchlist_picker::error::AppResult;
use watchlist_picker::fetcher::FetchOutcome;
use watchlist_picker::page::{EventOutcome, Page, PageElements, PageEvent};

#[tokio::main]
async fn main() -> AppResult<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let catalog = Arc::new(Catalog::load(config.catalog_path.as_deref())?);
    let client = ContentClient::with_config(config.client_config())?;

    let elements = PageElements::standard();
    if let Some(random) = &elements.random {
        random.type_select.write(|f| f.set_value(config.pick_type.as_str()));
        random.probability.write(|f| f.set_value(config.pick_prob.as_str()));
    }

    let page = Page::new(elements, client, &config.base_url, catalog);
    page.init().await;

    info!("Asking {} for a random pick", config.base_url);
    match page.dispatch(PageEvent::RandomRequested).await {
        EventOutcome::Fetched(FetchOutcome::Rendered { entrance, .. }) => {
            if let Err(e) = entrance.await {
                error!("Entrance transition did not run: {}", e);
            }
        }
        EventOutcome::Fetched(FetchOutcome::Failed(e)) => {
            error!("Random pick failed: {}", e);
        }
        _ => {}
    }

    if let Some(fetcher) = page.fetcher() {
        let (html, style) = fetcher
            .elements()
            .result
            .read(|c| (c.inner_html().to_string(), c.style.to_css()));
        info!("Result container style: {}", style);
        println!("{}", html);
    }

    Ok(())
}
