//! # Domain Types
//!
//! The two catalog records and the inputs used to create and change them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐  1      *  ┌─────────────────┐                    │
//! │  │    Category     │◄───────────│     Product     │                    │
//! │  │  ─────────────  │            │  ─────────────  │                    │
//! │  │  id (i64)       │            │  id (i64)       │                    │
//! │  │  name           │            │  category_id    │                    │
//! │  │  slug (unique)  │            │  name, slug     │                    │
//! │  └─────────────────┘            │  price_cents    │                    │
//! │                                 │  available      │                    │
//! │                                 │  created        │                    │
//! │                                 │  updated        │                    │
//! │                                 └─────────────────┘                    │
//! │                                                                         │
//! │  Inputs: NewCategory, CategoryUpdate, NewProduct, ProductUpdate        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record has a surrogate `id` assigned by the store on insert and a
//! URL-facing `slug`. Category slugs are unique; product slugs are not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_image_path, validate_name, validate_price, validate_slug, ValidationResult,
};

// =============================================================================
// Category
// =============================================================================

/// A named, slugged grouping of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    /// Surrogate identifier assigned by the store.
    pub id: i64,

    /// Display name (max 200 characters).
    pub name: String,

    /// URL-safe identifier, unique across all categories.
    pub slug: String,
}

/// A category reads as its name.
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Input for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        NewCategory {
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Checks every field rule. Slug uniqueness is left to the store.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name(&self.name)?;
        validate_slug(&self.slug)?;
        Ok(())
    }
}

/// Partial change to a category. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl CategoryUpdate {
    /// Change only the name.
    pub fn rename(name: impl Into<String>) -> Self {
        CategoryUpdate {
            name: Some(name.into()),
            slug: None,
        }
    }

    /// Change only the slug.
    pub fn reslug(slug: impl Into<String>) -> Self {
        CategoryUpdate {
            name: None,
            slug: Some(slug.into()),
        }
    }

    /// Returns true when the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none()
    }

    /// Validates the changed fields and returns the resulting category.
    pub fn apply_to(&self, category: &Category) -> ValidationResult<Category> {
        let mut next = category.clone();

        if let Some(name) = &self.name {
            validate_name(name)?;
            next.name = name.clone();
        }

        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
            next.slug = slug.clone();
        }

        Ok(next)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item. Belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Surrogate identifier assigned by the store.
    pub id: i64,

    /// Owning category. Deleting the category deletes the product.
    pub category_id: i64,

    /// Display name (max 200 characters).
    pub name: String,

    /// URL-safe identifier. Not unique.
    pub slug: String,

    /// Stored image reference, e.g. `products/2024/05/01/shirt.jpg`.
    pub image: Option<String>,

    /// Free text; empty when not provided.
    pub description: String,

    /// Price in cents (decimal(10, 2)).
    pub price_cents: i64,

    /// Whether the product is shown in storefront listings.
    pub available: bool,

    /// When the product was created. Never changes.
    #[ts(as = "String")]
    pub created: DateTime<Utc>,

    /// When the product was last written.
    #[ts(as = "String")]
    pub updated: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Input for creating a product.
///
/// ## Defaults
/// `description = ""`, `image = None`, `available = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub category_id: i64,
    pub name: String,
    pub slug: String,
    pub price: Money,
    pub description: String,
    pub image: Option<String>,
    pub available: bool,
}

impl NewProduct {
    pub fn new(
        category_id: i64,
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Money,
    ) -> Self {
        NewProduct {
            category_id,
            name: name.into(),
            slug: slug.into(),
            price,
            description: String::new(),
            image: None,
            available: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Checks every field rule. Whether the category exists is checked by
    /// the store.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name(&self.name)?;
        validate_slug(&self.slug)?;
        validate_price(self.price)?;
        if let Some(image) = &self.image {
            validate_image_path(image)?;
        }
        Ok(())
    }

    /// Builds the stored record once the store has assigned an id.
    pub fn into_product(self, id: i64, created: DateTime<Utc>) -> Product {
        Product {
            id,
            category_id: self.category_id,
            name: self.name,
            slug: self.slug,
            image: self.image,
            description: self.description,
            price_cents: self.price.cents(),
            available: self.available,
            created,
            updated: created,
        }
    }
}

/// Partial change to a product. `None` leaves the field as it is.
///
/// `image` is doubly optional: `Some(None)` clears the image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub image: Option<Option<String>>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub available: Option<bool>,
}

impl ProductUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Applies the change to `product`, validating every changed field.
    ///
    /// ## Timestamps
    /// ```text
    /// created  ──────────────► unchanged
    /// updated  ──────────────► max(now, previous updated)
    /// ```
    /// `updated` never moves backwards, even if the wall clock does, so
    /// `updated >= created` always holds.
    pub fn apply_to(&self, product: &Product, now: DateTime<Utc>) -> ValidationResult<Product> {
        let mut next = product.clone();

        if let Some(category_id) = self.category_id {
            next.category_id = category_id;
        }

        if let Some(name) = &self.name {
            validate_name(name)?;
            next.name = name.clone();
        }

        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
            next.slug = slug.clone();
        }

        if let Some(image) = &self.image {
            if let Some(path) = image {
                validate_image_path(path)?;
            }
            next.image = image.clone();
        }

        if let Some(description) = &self.description {
            next.description = description.clone();
        }

        if let Some(price) = self.price {
            validate_price(price)?;
            next.price_cents = price.cents();
        }

        if let Some(available) = self.available {
            next.available = available;
        }

        next.updated = now.max(product.updated);
        Ok(next)
    }
}

// =============================================================================
// Listing Order
// =============================================================================

/// Order of product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductOrdering {
    /// Ascending by name (storefront default).
    #[default]
    Name,
    /// Descending by creation time ("latest arrivals").
    NewestFirst,
}

/// Returns a ValidationError for a product pointing at a missing category.
pub fn unknown_category(id: i64) -> ValidationError {
    ValidationError::UnknownReference {
        field: "category".to_string(),
        id,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
