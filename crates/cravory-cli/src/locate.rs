//! `extract` and `resolve` commands.

use cravory_core::AppConfig;
use cravory_locator::{extract_coordinate_with_rule, LinkResolver};

/// Print the coordinate found in `text` and the rule that matched.
///
/// # Errors
///
/// Returns an error when no rule matches.
pub(crate) fn run_extract(text: &str) -> anyhow::Result<()> {
    let (coord, rule) = extract_coordinate_with_rule(text)
        .ok_or_else(|| anyhow::anyhow!("no coordinate found in input"))?;
    println!("{coord} ({rule})");
    Ok(())
}

/// Print the coordinate for `link`, going to the network only when the link
/// itself carries none.
///
/// # Errors
///
/// Returns an error if the resolver cannot be built or nothing is found.
pub(crate) async fn run_resolve(config: &AppConfig, link: &str) -> anyhow::Result<()> {
    if let Some((coord, rule)) = extract_coordinate_with_rule(link) {
        println!("{coord} ({rule}, no request needed)");
        return Ok(());
    }

    let resolver = LinkResolver::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build link resolver: {e}"))?;
    let coord = resolver
        .resolve(link)
        .await
        .ok_or_else(|| anyhow::anyhow!("could not resolve a coordinate for {link}"))?;
    println!("{coord} (resolved)");
    Ok(())
}
