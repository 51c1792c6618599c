//! # Seed Data Generator
//!
//! Populates the catalog with test categories and products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p shop-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p shop-db --bin seed -- --count 1000
//!
//! # Specify database path (overrides SHOP_DATABASE_PATH)
//! cargo run -p shop-db --bin seed -- --db ./data/shop.db
//! ```
//!
//! ## Generated Data
//! One category per entry in [`CATALOG`], each product in every size.
//! Every seventh product is marked unavailable and every third one gets an
//! image path under `products/YYYY/MM/DD/`.

use chrono::Utc;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shop_core::validation::{image_upload_path, slugify};
use shop_core::{Money, NewCategory, NewProduct};
use shop_db::{CatalogConfig, Database};

/// Categories with their product names.
const CATALOG: &[(&str, &[&str])] = &[
    (
        "Clothing",
        &[
            "T-Shirt",
            "Hoodie",
            "Denim Jacket",
            "Rain Coat",
            "Wool Sweater",
            "Polo Shirt",
            "Cargo Pants",
            "Summer Dress",
        ],
    ),
    (
        "Shoes",
        &[
            "Running Shoes",
            "Leather Boots",
            "Canvas Sneakers",
            "Sandals",
            "Loafers",
            "Hiking Boots",
        ],
    ),
    (
        "Accessories",
        &[
            "Leather Belt",
            "Wool Scarf",
            "Baseball Cap",
            "Sunglasses",
            "Backpack",
            "Wallet",
            "Beanie",
        ],
    ),
    (
        "Home & Living",
        &[
            "Ceramic Mug",
            "Throw Pillow",
            "Linen Towel",
            "Scented Candle",
            "Desk Lamp",
        ],
    ),
];

const DEFAULT_COUNT: usize = 200;

/// Size variants with their price addon in cents.
const SIZES: &[(&str, i64)] = &[("S", 0), ("M", 200), ("L", 400), ("XL", 650)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args)? {
        Some(args) => args,
        None => {
            print_help();
            return Ok(());
        }
    };

    let mut config = CatalogConfig::load()?;
    if let Some(path) = args.database_path {
        config.database_path = path;
    }
    let count = args.count;

    info!(database = %config.database_path, products = count, "Seeding catalog");

    let db = Database::new(config.db_config()).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        warn!(existing, "Catalog already has products, skipping seed");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    'catalog: for (category_name, names) in CATALOG {
        let category = match db
            .categories()
            .create(NewCategory::new(*category_name, slugify(category_name)))
            .await
        {
            Ok(category) => category,
            Err(e) => {
                warn!(category = %category_name, error = %e, "Failed to insert category");
                continue;
            }
        };

        for (product_idx, name) in names.iter().enumerate() {
            for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'catalog;
                }

                let new = generate_product(category.id, name, size, *price_addon, product_idx * 10 + size_idx);

                if let Err(e) = db.products().create(new).await {
                    warn!(product = %name, size = %size, error = %e, "Failed to insert product");
                    continue;
                }

                generated += 1;

                if generated % 50 == 0 {
                    info!(generated, "Seeding in progress");
                }
            }
        }
    }

    let elapsed = start.elapsed();
    info!(
        generated,
        elapsed_ms = elapsed.as_millis() as u64,
        "Seed complete"
    );

    let available = db
        .products()
        .list_available(None, Default::default())
        .await?;
    info!(available = available.len(), "Available products in storefront");

    db.close().await;

    Ok(())
}

/// Command line options. Flags override the environment.
#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    count: usize,
    database_path: Option<String>,
}

/// Parses the flags after the program name. Returns `None` for `--help`.
fn parse_args(args: &[String]) -> Result<Option<SeedArgs>, Box<dyn std::error::Error>> {
    let mut parsed = SeedArgs {
        count: DEFAULT_COUNT,
        database_path: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--count" | "-c" => {
                let raw = iter.next().ok_or("--count needs a value")?;
                parsed.count = raw
                    .parse()
                    .map_err(|_| format!("invalid --count value: {raw:?}"))?;
            }
            "--db" | "-d" => {
                let path = iter.next().ok_or("--db needs a value")?;
                parsed.database_path = Some(path.clone());
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }

    Ok(Some(parsed))
}

fn print_help() {
    println!("Shop Catalog Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
    println!("  -d, --db <PATH>    Database file path (default: $SHOP_DATABASE_PATH or ./shop.db)");
    println!("  -h, --help         Show this help message");
}

/// Builds a single product with deterministic data.
fn generate_product(category_id: i64, name: &str, size: &str, price_addon: i64, seed: usize) -> NewProduct {
    let full_name = format!("{} {}", name, size);

    // base $9.99 - $89.99 + size addon
    let base_price = 999 + ((seed * 37) % 8000) as i64;
    let price = Money::from_cents(base_price + price_addon);

    let mut product = NewProduct::new(category_id, full_name.as_str(), slugify(&full_name), price)
        .with_description(format!("{} in size {}.", name, size))
        .with_available(seed % 7 != 0);

    if seed % 3 == 0 {
        let filename = format!("{}.jpg", slugify(name));
        product = product.with_image(image_upload_path(&filename, Utc::now()));
    }

    product
}
