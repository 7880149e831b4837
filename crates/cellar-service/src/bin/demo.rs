//! # Cellar Demo Walkthrough
//!
//! Seeds a small catalog and walks it through browsing, favorites,
//! carting, and checkout, including the rejections a client has to
//! handle.
//!
//! ## Usage
//! ```bash
//! # Run with default limits
//! cargo run -p cellar-service --bin demo
//!
//! # Cap carts at 3 lines
//! cargo run -p cellar-service --bin demo -- --cart-lines 3
//!
//! # Smaller catalog pages
//! cargo run -p cellar-service --bin demo -- --page-size 2
//! ```
//!
//! ## Configuration
//! Environment variables (flags take precedence):
//! - `CELLAR_MAX_CART_LINES` - Maximum distinct lines per cart
//! - `CELLAR_PAGE_SIZE` - Default catalog page size
//! - `RUST_LOG` - Log filter (default: `info`)
//!
//! ## Seeded Catalog
//! A small Belgian cellar:
//! - 3 styles with serving temperatures
//! - 3 breweries
//! - 6 beers, one of them already sold out
//! - 1 user with an empty cart
//!
//! The walkthrough deliberately triggers every guard once: an
//! out-of-stock cart add, a stale version token, and a duplicate
//! checkout submission.

use std::collections::HashMap;
use std::env;

use tracing_subscriber::EnvFilter;

use cellar_core::types::{BeerFields, BreweryFields, StyleFields, UserFields};
use cellar_service::{Shop, ShopError};
use cellar_store::{Store, StoreConfig};

/// Styles as (name, serving temperature in °C)
const STYLES: &[(&str, i32)] = &[("Trappist", 12), ("Saison", 6), ("Lambic", 5)];

/// Breweries
const BREWERIES: &[&str] = &[
    "Brasserie de Rochefort",
    "Brasserie Dupont",
    "Brouwerij Cantillon",
];

/// Beers as (name, style, brewery, stock)
const BEERS: &[(&str, &str, &str, u32)] = &[
    ("Rochefort 10", "Trappist", "Brasserie de Rochefort", 12),
    ("Rochefort 8", "Trappist", "Brasserie de Rochefort", 7),
    ("Saison Dupont", "Saison", "Brasserie Dupont", 9),
    ("Avec les Bons Voeux", "Saison", "Brasserie Dupont", 4),
    ("Gueuze 100% Lambic", "Lambic", "Brouwerij Cantillon", 2),
    ("Kriek", "Lambic", "Brouwerij Cantillon", 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let defaults = StoreConfig::new();
    let mut cart_lines = env_limit("CELLAR_MAX_CART_LINES", defaults.max_cart_lines);
    let mut page_size = env_limit("CELLAR_PAGE_SIZE", defaults.default_page_size);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cart-lines" | "-l" => {
                if i + 1 < args.len() {
                    cart_lines = args[i + 1].parse().unwrap_or(cart_lines);
                    i += 1;
                }
            }
            "--page-size" | "-p" => {
                if i + 1 < args.len() {
                    page_size = args[i + 1].parse().unwrap_or(page_size);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cellar Demo Walkthrough");
                println!();
                println!("Usage: demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -l, --cart-lines <N>   Maximum distinct lines per cart (default: 100)");
                println!("  -p, --page-size <N>    Default catalog page size (default: 25)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🍺 Cellar Demo Walkthrough");
    println!("==========================");
    println!("Cart line cap: {}", cart_lines);
    println!("Page size: {}", page_size);
    println!();

    let config = StoreConfig::new()
        .max_cart_lines(cart_lines)
        .default_page_size(page_size);
    let shop = Shop::new(Store::new(config));

    // Seed the catalog
    let seeded = seed_catalog(&shop).await?;
    println!(
        "✓ Seeded {} styles, {} breweries, {} beers, 1 user",
        STYLES.len(),
        BREWERIES.len(),
        seeded.beers.len()
    );
    println!();

    let catalog = shop.catalog();
    let carts = shop.carts();
    let checkout = shop.checkout();
    let user_id = &seeded.user_id;

    // Browse the catalog
    println!("Browsing...");
    let page = catalog.list_beers(Some(1), None).await?;
    println!(
        "  Page {} of {} ({} beers total):",
        page.paging.page, page.paging.total_pages, page.paging.total_items
    );
    for beer in &page.items {
        println!("  - {} (stock {})", beer.name, beer.stock);
    }

    let rochefort = &seeded.beers["Rochefort 10"];
    let detail = catalog.get_beer(rochefort).await?;
    println!();
    println!("Beer detail with resolved references:");
    println!("{}", serde_json::to_string_pretty(&detail)?);
    println!();

    // Favorites
    carts.add_favorite(user_id, rochefort).await?;
    carts
        .add_favorite(user_id, &seeded.beers["Saison Dupont"])
        .await?;
    let favorites = carts.favorite_beers(user_id).await?;
    println!(
        "✓ Favorites: {}",
        favorites
            .iter()
            .map(|beer| beer.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    // Fill the cart
    println!("Filling the cart...");
    carts.add_item(user_id, rochefort, 2).await?;
    carts
        .add_item(user_id, &seeded.beers["Gueuze 100% Lambic"], 1)
        .await?;
    let line = carts.add_item(user_id, rochefort, 3).await?;
    println!("  Re-adding a beer replaces its line: count now {}", line.count);

    match carts.add_item(user_id, &seeded.beers["Kriek"], 1).await {
        Ok(_) => println!("⚠ Out-of-stock add unexpectedly succeeded"),
        Err(err) => println!("  ✓ Out-of-stock add rejected: {}", err),
    }

    let view = carts.get_cart(user_id).await?;
    println!("  Cart at sequence {}:", view.order_sequence);
    for line in &view.lines {
        println!(
            "  - {} x{}",
            line.beer_name.as_deref().unwrap_or("(deleted)"),
            line.count
        );
    }
    println!();

    // Keep a version token from before checkout; it will go stale
    let stale_token = catalog.get_beer(rochefort).await?.version;

    // Check out
    checkout.place_order(user_id, view.order_sequence).await?;
    println!("✓ Checkout committed");
    for name in ["Rochefort 10", "Gueuze 100% Lambic"] {
        let beer = catalog.get_beer(&seeded.beers[name]).await?;
        println!("  {} stock now {}", name, beer.stock);
    }
    let view = carts.get_cart(user_id).await?;
    println!(
        "  Cart empty: {}, sequence now {}",
        view.lines.is_empty(),
        view.order_sequence
    );

    // The same submission a second time must lose
    match checkout.place_order(user_id, 0).await {
        Ok(()) => println!("⚠ Duplicate submission unexpectedly succeeded"),
        Err(err) => println!("✓ Duplicate submission rejected: {}", err),
    }
    println!();

    // Restock against the version guard
    println!("Restocking...");
    let restock = BeerFields {
        name: "Rochefort 10".to_string(),
        style_id: detail.style.as_ref().map(|style| style.id.clone()),
        brewery_id: detail.brewery.as_ref().map(|brewery| brewery.id.clone()),
        picture: None,
        stock: 24,
    };
    match catalog.replace_beer(rochefort, restock.clone(), stale_token).await {
        Ok(_) => println!("⚠ Stale replace unexpectedly succeeded"),
        Err(err) => println!("  ✓ Stale token rejected: {}", err),
    }
    let current = catalog.get_beer(rochefort).await?.version;
    let token = catalog.replace_beer(rochefort, restock, current).await?;
    println!("  ✓ Replaced with the current token, version now {}", token);
    println!();

    let sizes = shop.store().table_sizes().await;
    println!(
        "Final tables: {} beers, {} breweries, {} styles, {} users, {} carts, {} cart lines, {} favorites",
        sizes.beers,
        sizes.breweries,
        sizes.styles,
        sizes.users,
        sizes.carts,
        sizes.cart_items,
        sizes.favorites
    );
    println!();
    println!("✓ Walkthrough complete!");

    Ok(())
}

/// Reads a numeric limit from the environment, falling back to `default`.
fn env_limit<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Seeded entity ids, keyed by the names in the constant tables.
struct Seeded {
    beers: HashMap<&'static str, String>,
    user_id: String,
}

/// Creates the styles, breweries, beers, and the demo user.
async fn seed_catalog(shop: &Shop) -> Result<Seeded, ShopError> {
    let catalog = shop.catalog();

    let mut style_ids: HashMap<&str, String> = HashMap::new();
    for (name, temperature) in STYLES {
        let style = catalog
            .create_style(StyleFields {
                name: name.to_string(),
                optimal_temperature: *temperature,
            })
            .await?;
        style_ids.insert(name, style.id);
    }

    let mut brewery_ids: HashMap<&str, String> = HashMap::new();
    for name in BREWERIES {
        let brewery = catalog
            .create_brewery(BreweryFields {
                name: name.to_string(),
            })
            .await?;
        brewery_ids.insert(name, brewery.id);
    }

    let mut beers: HashMap<&'static str, String> = HashMap::new();
    for (name, style, brewery, stock) in BEERS {
        let beer = catalog
            .create_beer(BeerFields {
                name: name.to_string(),
                style_id: style_ids.get(style).cloned(),
                brewery_id: brewery_ids.get(brewery).cloned(),
                picture: None,
                stock: *stock,
            })
            .await?;
        beers.insert(name, beer.id);
    }

    let user = catalog
        .create_user(UserFields {
            name: "Nora".to_string(),
        })
        .await?;

    Ok(Seeded {
        beers,
        user_id: user.id,
    })
}
