//! Live listing walkthrough against the Open Brewery DB API
//!
//! Drives a BreweryBrowser through a search, a sort flip and a page turn,
//! printing each settled snapshot. Needs network access.
//!
//! Run: cargo run --example live_listing

use std::time::Duration;

use taplist_client::{BreweryBrowser, ClientConfig, ListingSnapshot, OPEN_BREWERY_DB_URL};

async fn settled(browser: &mut BreweryBrowser) -> ListingSnapshot {
    loop {
        let snapshot = browser.snapshot();
        if !snapshot.loading {
            return snapshot;
        }
        browser.changed().await;
    }
}

fn print_snapshot(label: &str, snapshot: &ListingSnapshot) {
    if let Some(error) = &snapshot.error {
        tracing::error!(%label, %error, "listing failed");
        return;
    }
    tracing::info!(
        %label,
        total = snapshot.total,
        page_count = snapshot.page_count,
        "listing settled"
    );
    for row in &snapshot.rows {
        println!("  {} ({}, {})", row.name, row.city, row.country);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let base_url =
        std::env::var("TAPLIST_API_URL").unwrap_or_else(|_| OPEN_BREWERY_DB_URL.to_string());
    let config = ClientConfig::new(base_url).with_debounce(Duration::from_millis(300));

    let mut browser = BreweryBrowser::connect(config)?;
    print_snapshot("initial page", &settled(&mut browser).await);

    browser.set_search("dog");
    browser.set_search("dogfish");
    print_snapshot("search: dogfish", &settled(&mut browser).await);

    browser.set_search("");
    browser.sort_by("name");
    print_snapshot("name descending", &settled(&mut browser).await);

    browser.set_page(2);
    print_snapshot("page 2", &settled(&mut browser).await);

    Ok(())
}
