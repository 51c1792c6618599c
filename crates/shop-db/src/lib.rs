//! # shop-db: Database Layer for the Shop Catalog
//!
//! This crate stores categories and products in SQLite, using sqlx for
//! async access. Field rules live in `shop-core`; this crate adds the rules
//! that need the table: unique category slugs, existing categories and the
//! cascade from a category to its products.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Data Flow                                │
//! │                                                                         │
//! │  Caller (web handler, seed binary, tests)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shop-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ CategoryRepo   │   │              │   │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo    │   │ 001_catalog  │   │   │
//! │  │   │ CatalogConfig │    │ ProductQuery   │   │ _schema.sql  │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                SQLite Database ($SHOP_DATABASE_PATH)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven configuration
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Category and product repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shop_core::{NewCategory, NewProduct, ProductOrdering};
//! use shop_db::{CatalogConfig, Database};
//!
//! let db = Database::new(CatalogConfig::load()?.db_config()).await?;
//!
//! let clothing = db.categories().create(NewCategory::new("Clothing", "clothing")).await?;
//! let price = "19.99".parse()?;
//! db.products().create(NewProduct::new(clothing.id, "T-Shirt", "t-shirt", price)).await?;
//!
//! let storefront = db.products().list_available(None, ProductOrdering::Name).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{CatalogConfig, ConfigError};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::product::{ProductQuery, ProductRepository};
