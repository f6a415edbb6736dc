mod feed;
mod locate;
mod submit;

use clap::{Parser, Subcommand};
use cravory_core::{Coordinate, NewRestaurant};
use cravory_locator::{FeedFilter, FeedSort, ALL_CATEGORIES};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cravory-cli")]
#[command(about = "Cravory restaurant feed command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch restaurants, resolve pending map links and print the feed
    Feed {
        /// User latitude in degrees
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        /// User longitude in degrees
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
        /// Case-insensitive text matched against names and dishes
        #[arg(long, default_value = "")]
        query: String,
        /// Dish category to match, or "All"
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
        /// Only restaurants with a vegetarian dish
        #[arg(long)]
        veg: bool,
        /// Sort by distance instead of feed order
        #[arg(long)]
        nearest: bool,
        /// Print the feed as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract a coordinate from a map link or text without network access
    Extract { text: String },
    /// Resolve a map link, following redirects if needed
    Resolve { link: String },
    /// Create a restaurant, or update the one with the same name
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        map_link: String,
        /// Comma-separated dish names
        #[arg(long)]
        dishes: String,
        /// Image as data-URI text
        #[arg(long)]
        restaurant_image: String,
        /// Image as data-URI text
        #[arg(long)]
        dish_image: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cravory_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Feed {
            lat,
            lng,
            query,
            category,
            veg,
            nearest,
            json,
        }) => {
            let options = feed::FeedOptions {
                user: lat.zip(lng).map(|(lat, lng)| Coordinate::new(lat, lng)),
                filter: FeedFilter {
                    query,
                    category,
                    veg_only: veg,
                    sort: if nearest {
                        FeedSort::Nearest
                    } else {
                        FeedSort::Feed
                    },
                },
                json,
            };
            feed::run_feed(&config, &options).await?;
        }
        Some(Commands::Extract { text }) => locate::run_extract(&text)?,
        Some(Commands::Resolve { link }) => locate::run_resolve(&config, &link).await?,
        Some(Commands::Submit {
            name,
            map_link,
            dishes,
            restaurant_image,
            dish_image,
        }) => {
            let restaurant = NewRestaurant {
                name,
                map_link,
                dishes,
                restaurant_image,
                dish_image,
            };
            submit::run_submit(&config, &restaurant).await?;
        }
        None => println!("cravory-cli: run with --help to list commands"),
    }

    Ok(())
}
