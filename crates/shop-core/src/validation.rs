//! # Validation Module
//!
//! Field rules for catalog records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (pure, before any SQL)                           │
//! │  ├── Required fields (name, slug)                                      │
//! │  ├── Length budgets (200 / 200 / 100)                                  │
//! │  ├── Slug alphabet                                                     │
//! │  └── Price digit budget (decimal(10, 2))                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE (category.slug)                                            │
//! │  └── FOREIGN KEY (product.category_id) ON DELETE CASCADE               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::validation::{slugify, validate_slug};
//!
//! let slug = slugify("Summer Sale 2024");
//! assert_eq!(slug, "summer-sale-2024");
//! assert!(validate_slug(&slug).is_ok());
//! ```
//!
//! Lengths are counted in characters, not bytes.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::money::Money;
use crate::{
    IMAGE_UPLOAD_DIR, MAX_IMAGE_PATH_LENGTH, MAX_NAME_LENGTH, MAX_SLUG_LENGTH,
    PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category or product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use shop_core::validation::validate_name;
///
/// assert!(validate_name("Clothing").is_ok());
/// assert!(validate_name("   ").is_err());
/// assert!(validate_name(&"A".repeat(201)).is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::too_long("name", MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validates a slug.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
/// - Only ASCII letters, digits, hyphens, and underscores
///
/// ## Example
/// ```rust
/// use shop_core::validation::validate_slug;
///
/// assert!(validate_slug("t-shirt").is_ok());
/// assert!(validate_slug("summer_sale_2").is_ok());
/// assert!(validate_slug("t shirt").is_err());
/// assert!(validate_slug("café").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    if slug.is_empty() {
        return Err(ValidationError::required("slug"));
    }

    if slug.chars().count() > MAX_SLUG_LENGTH {
        return Err(ValidationError::too_long("slug", MAX_SLUG_LENGTH));
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::invalid_format(
            "slug",
            "must contain only letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(())
}

/// Validates a stored image reference.
///
/// ## Rules
/// - Must not be blank
/// - At most 100 characters
pub fn validate_image_path(path: &str) -> ValidationResult<()> {
    if path.trim().is_empty() {
        return Err(ValidationError::required("image"));
    }

    if path.chars().count() > MAX_IMAGE_PATH_LENGTH {
        return Err(ValidationError::too_long("image", MAX_IMAGE_PATH_LENGTH));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price against the `decimal(10, 2)` budget.
///
/// ## Rules
/// - At most 10 digits in total, 2 of them after the decimal point
/// - Sign is not checked; negative prices are accepted
///
/// ## Example
/// ```rust
/// use shop_core::money::Money;
/// use shop_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1999)).is_ok());
/// assert!(validate_price(Money::from_cents(99_999_999_99)).is_ok());
///
/// let too_big: Money = "12345678901.23".parse().unwrap();
/// assert!(validate_price(too_big).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.fits_decimal(PRICE_MAX_DIGITS) {
        return Err(ValidationError::TooManyDigits {
            field: "price".to_string(),
            max_digits: PRICE_MAX_DIGITS,
            decimal_places: PRICE_DECIMAL_PLACES,
        });
    }

    Ok(())
}

// =============================================================================
// Derivation Helpers
// =============================================================================

/// Derives a slug from free text.
///
/// ## Steps
/// ```text
/// "  Men's Shoes -- Summer  "
///      │ lowercase, drop anything but [a-z0-9_], whitespace, "-"
///      ▼
/// "  mens shoes -- summer  "
///      │ runs of whitespace / hyphens between words → single "-"
///      ▼
/// "mens-shoes-summer"
///      │ trim "-" and "_" at both ends
///      ▼
/// "mens-shoes-summer"
/// ```
///
/// Non-ASCII characters are dropped, so the result always passes
/// [`validate_slug`] unless it is empty or too long.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_whitespace() || c == '-' {
            pending_separator = true;
            continue;
        }

        if !(c.is_ascii_alphanumeric() || c == '_') {
            continue;
        }

        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.push(c.to_ascii_lowercase());
    }

    slug.trim_matches(|c: char| c == '-' || c == '_').to_string()
}

/// Builds the date-partitioned reference under which an uploaded image is
/// stored: `products/YYYY/MM/DD/<file name>`.
///
/// Any directory part of `filename` is discarded.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use shop_core::validation::image_upload_path;
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// assert_eq!(
///     image_upload_path("uploads/shirt.jpg", at),
///     "products/2024/05/01/shirt.jpg"
/// );
/// ```
pub fn image_upload_path(filename: &str, at: DateTime<Utc>) -> String {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    format!("{}/{}/{}", IMAGE_UPLOAD_DIR, at.format("%Y/%m/%d"), base)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Clothing").is_ok());
        assert!(validate_name(&"A".repeat(200)).is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 200 two-byte characters are still 200 characters.
        assert!(validate_name(&"é".repeat(200)).is_ok());
        assert!(validate_name(&"é".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("clothing").is_ok());
        assert!(validate_slug("t-shirt").is_ok());
        assert!(validate_slug("Summer_Sale_2").is_ok());

        assert!(matches!(
            validate_slug(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_slug(&"a".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
        assert!(matches!(
            validate_slug("has space"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_slug("a/b").is_err());
    }

    #[test]
    fn test_validate_image_path() {
        assert!(validate_image_path("products/2024/05/01/shirt.jpg").is_ok());
        assert!(validate_image_path("").is_err());
        assert!(validate_image_path(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(0)).is_ok());
        assert!(validate_price(Money::from_cents(1999)).is_ok());
        assert!(validate_price(Money::from_cents(-1999)).is_ok());
        assert!(validate_price(Money::from_cents(99_999_999_99)).is_ok());

        let err = validate_price("12345678901.23".parse().unwrap()).unwrap_err();
        assert!(matches!(err, ValidationError::TooManyDigits { .. }));
        assert!(validate_price(Money::from_cents(100_000_000_00)).is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Clothing"), "clothing");
        assert_eq!(slugify("T-Shirt"), "t-shirt");
        assert_eq!(slugify("  Men's Shoes -- Summer  "), "mens-shoes-summer");
        assert_eq!(slugify("snake_case name"), "snake_case-name");
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_output_is_valid() {
        for text in ["Summer Sale 2024", "  a  b  ", "x--y", "_lead_"] {
            let slug = slugify(text);
            assert!(validate_slug(&slug).is_ok(), "{text:?} -> {slug:?}");
        }
    }

    #[test]
    fn test_image_upload_path() {
        let at = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 0).unwrap();
        assert_eq!(image_upload_path("shirt.jpg", at), "products/2024/01/09/shirt.jpg");
        assert_eq!(
            image_upload_path("C:\\photos\\shirt.jpg", at),
            "products/2024/01/09/shirt.jpg"
        );
    }
}
