//! `submit` command.

use cravory_core::{AppConfig, NewRestaurant};
use cravory_locator::{ClientError, RestaurantsClient};

/// Submit a restaurant and re-fetch the list so the caller sees the result.
///
/// # Errors
///
/// Returns an error for validation failures, timeouts and server rejections,
/// carrying the server's message when there is one.
pub(crate) async fn run_submit(config: &AppConfig, restaurant: &NewRestaurant) -> anyhow::Result<()> {
    let client = RestaurantsClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build restaurants client: {e}"))?;

    let outcome = match client.submit(restaurant).await {
        Ok(outcome) => outcome,
        Err(ClientError::Validation(e)) => {
            anyhow::bail!("{e} (missing: {})", missing_fields(&e).join(", "))
        }
        Err(e) => return Err(e.into()),
    };

    if outcome.updated {
        println!("updated restaurant {}", outcome.id);
    } else {
        println!("created restaurant {}", outcome.id);
    }

    let records = client.list().await?;
    println!("{} restaurants listed", records.len());
    Ok(())
}

fn missing_fields(error: &cravory_core::ValidationError) -> Vec<&'static str> {
    match error {
        cravory_core::ValidationError::MissingFields { fields } => fields.clone(),
    }
}
