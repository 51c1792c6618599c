//! # shop-core: Pure Catalog Model
//!
//! This crate holds the catalog's records and the rules they obey, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shop Catalog Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (admin tool, storefront)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │ Category  │  │   Money   │  │  lengths  │                  │   │
//! │  │   │  Product  │  │  10 / 2   │  │  slugs    │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shop-db (Database Layer)                     │   │
//! │  │              SQLite schema, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (Category, Product) and their inputs
//! - [`money`] - Fixed-point price type (integer cents)
//! - [`error`] - Validation error type
//! - [`validation`] - Field rules, slugs, image paths
//!
//! ## Example Usage
//!
//! ```rust
//! use shop_core::money::Money;
//! use shop_core::types::NewProduct;
//!
//! let price: Money = "19.99".parse().unwrap();
//! let product = NewProduct::new(1, "T-Shirt", "t-shirt", price);
//!
//! assert!(product.validate().is_ok());
//! assert!(product.available);
//! assert_eq!(product.image, None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length (in characters) of a category or product name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length (in characters) of a category or product slug.
pub const MAX_SLUG_LENGTH: usize = 200;

/// Maximum length (in characters) of a stored image reference.
pub const MAX_IMAGE_PATH_LENGTH: usize = 100;

/// Total number of decimal digits a price may carry.
pub const PRICE_MAX_DIGITS: u32 = 10;

/// Number of digits after the decimal point in a price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Namespace under which product images are stored.
pub const IMAGE_UPLOAD_DIR: &str = "products";
