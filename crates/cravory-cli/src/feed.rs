//! `feed` command: list restaurants, resolve short links, print.

use cravory_core::{AppConfig, Coordinate};
use cravory_locator::{
    compose_feed, DerivedViewRecord, FeedFilter, LinkResolver, ResolutionManager,
    RestaurantsClient,
};

pub(crate) struct FeedOptions {
    pub user: Option<Coordinate>,
    pub filter: FeedFilter,
    pub json: bool,
}

/// Fetch the records, run resolution batches until the cache settles, then
/// print the composed feed.
///
/// Links whose resolution failed are shown without distance; a later
/// invocation tries them again.
///
/// # Errors
///
/// Returns an error if a client cannot be built or the listing fails.
pub(crate) async fn run_feed(config: &AppConfig, options: &FeedOptions) -> anyhow::Result<()> {
    let client = RestaurantsClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build restaurants client: {e}"))?;
    let resolver = LinkResolver::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build link resolver: {e}"))?;
    let manager = ResolutionManager::new(config.resolve_batch_limit);

    let records = client.list().await?;
    let reports = manager.run_until_settled(&records, &resolver).await;
    tracing::debug!(
        records = records.len(),
        batches = reports.len(),
        resolved = reports.iter().map(|r| r.resolved).sum::<usize>(),
        "map link resolution settled"
    );

    let cache = manager.snapshot().await;
    let feed = compose_feed(&records, &cache, options.user, &options.filter);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
        return Ok(());
    }

    if feed.is_empty() {
        println!("no restaurants match");
        return Ok(());
    }
    for view in &feed {
        println!("{}", format_row(view));
    }
    Ok(())
}

fn format_row(view: &DerivedViewRecord) -> String {
    let mut row = format!("{}  ★ {:.1}", view.record.name, view.rating);
    if let (Some(distance), Some(eta)) = (view.distance_label(), view.eta_label()) {
        row.push_str(&format!("  {distance}  {eta}"));
    }
    row.push_str(&format!("  [{}]", view.record.dish_list().join(", ")));
    row
}
