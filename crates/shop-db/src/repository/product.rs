//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD with category existence checked inside the write transaction
//! - Storefront listings (available only, by name or newest first)
//! - Lazy, restartable product queries
//!
//! ## Listings and Indexes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Which index serves which read                        │
//! │                                                                         │
//! │  get_by_id_and_slug(7, "t-shirt")   ──► idx_product_id_slug (id, slug) │
//! │                                                                         │
//! │  ProductOrdering::Name              ──► idx_product_name               │
//! │    "A-Line Skirt", "Boots", "T-Shirt"                                  │
//! │                                                                         │
//! │  ProductOrdering::NewestFirst       ──► idx_product_created (DESC)     │
//! │    created 12:03, 12:02, 12:01                                         │
//! │                                                                         │
//! │  category filter                    ──► idx_product_category           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::begin_write;
use shop_core::types::unknown_category;
use shop_core::{NewProduct, Product, ProductOrdering, ProductUpdate};

/// Builds a `SELECT` over every product column followed by the given
/// clauses. Kept as a macro so each statement stays a `&'static str`.
macro_rules! select_products {
    ($($clause:literal),* $(,)?) => {
        concat!(
            "SELECT id, category_id, name, slug, image, ",
            "COALESCE(description, '') AS description, ",
            "price_cents, available, created, updated ",
            "FROM product ",
            $($clause, " "),*
        )
    };
}

const GET_BY_ID: &str = select_products!("WHERE id = ?1");

const GET_BY_ID_AND_SLUG: &str = select_products!("WHERE id = ?1 AND slug = ?2");

// ?1 category filter (NULL = any), ?2 available only (0/1), ?3 limit (-1 = none)
const LIST_BY_NAME: &str = select_products!(
    "WHERE (?1 IS NULL OR category_id = ?1)",
    "AND (?2 = 0 OR available = 1)",
    "ORDER BY name ASC, id ASC",
    "LIMIT ?3"
);

const LIST_NEWEST_FIRST: &str = select_products!(
    "WHERE (?1 IS NULL OR category_id = ?1)",
    "AND (?2 = 0 OR available = 1)",
    "ORDER BY created DESC, id DESC",
    "LIMIT ?3"
);

const COUNT_MATCHING: &str = "SELECT COUNT(*) FROM product \
     WHERE (?1 IS NULL OR category_id = ?1) AND (?2 = 0 OR available = 1)";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let shirt = repo.create(NewProduct::new(clothing.id, "T-Shirt", "t-shirt", price)).await?;
/// let storefront = repo.list_available(None, ProductOrdering::Name).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// `created` and `updated` are both set to the current time.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Stored product with its assigned id
    /// * `Err(DbError::Validation)` - A field breaks a rule, or the category
    ///   does not exist
    pub async fn create(&self, new: NewProduct) -> DbResult<Product> {
        new.validate()?;

        debug!(category_id = %new.category_id, slug = %new.slug, "Inserting product");

        let mut tx = begin_write(&self.pool).await?;
        ensure_category_exists(&mut tx, new.category_id).await?;

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO product (
                category_id, name, slug, image, description,
                price_cents, available, created, updated
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(new.category_id)
        .bind(&new.name)
        .bind(&new.slug)
        .bind(&new.image)
        .bind(&new.description)
        .bind(new.price.cents())
        .bind(new.available)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(new.into_product(result.last_insert_rowid(), now))
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(GET_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by ID and slug, the pair a product detail URL carries.
    ///
    /// A stale slug yields `None` even when the id exists.
    pub async fn get_by_id_and_slug(&self, id: i64, slug: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(GET_BY_ID_AND_SLUG)
            .bind(id)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Applies a partial change to a product and refreshes `updated`.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product as stored after the change
    /// * `Err(DbError::NotFound)` - No product with this id
    /// * `Err(DbError::Validation)` - A changed field breaks a rule, or the
    ///   new category does not exist
    pub async fn update(&self, id: i64, update: ProductUpdate) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        let mut tx = begin_write(&self.pool).await?;

        let current = sqlx::query_as::<_, Product>(GET_BY_ID)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        let next = update.apply_to(&current, Utc::now())?;

        if next.category_id != current.category_id {
            ensure_category_exists(&mut tx, next.category_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE product SET
                category_id = ?2,
                name = ?3,
                slug = ?4,
                image = ?5,
                description = ?6,
                price_cents = ?7,
                available = ?8,
                updated = ?9
            WHERE id = ?1
            "#,
        )
        .bind(next.id)
        .bind(next.category_id)
        .bind(&next.name)
        .bind(&next.slug)
        .bind(&next.image)
        .bind(&next.description)
        .bind(next.price_cents)
        .bind(next.available)
        .bind(next.updated)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(next)
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM product WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists available products, optionally limited to one category.
    ///
    /// ## Example
    /// ```rust,ignore
    /// // Storefront: everything on sale, A to Z
    /// let all = repo.list_available(None, ProductOrdering::Name).await?;
    ///
    /// // Latest arrivals in one category
    /// let new_in = repo.list_available(Some(shoes.id), ProductOrdering::NewestFirst).await?;
    /// ```
    pub async fn list_available(
        &self,
        category_id: Option<i64>,
        ordering: ProductOrdering,
    ) -> DbResult<Vec<Product>> {
        let mut query = self.query().available_only().ordered_by(ordering);
        if let Some(id) = category_id {
            query = query.category(id);
        }

        let products = query.all().await?;

        debug!(count = products.len(), "Listed available products");
        Ok(products)
    }

    /// Starts a lazy query over all products.
    pub fn query(&self) -> ProductQuery {
        ProductQuery::new(self.pool.clone())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        self.query().count().await
    }
}

/// Fails with a validation error when `category_id` does not exist.
async fn ensure_category_exists(
    tx: &mut Transaction<'_, Sqlite>,
    category_id: i64,
) -> DbResult<()> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM category WHERE id = ?1")
        .bind(category_id)
        .fetch_optional(&mut **tx)
        .await?;

    if exists.is_none() {
        return Err(DbError::Validation(unknown_category(category_id)));
    }

    Ok(())
}

// =============================================================================
// Product Query
// =============================================================================

/// A lazy, restartable product listing.
///
/// Building or cloning a query touches no rows. Each call to [`fetch`],
/// [`all`] or [`count`] runs it afresh against the current table.
///
/// [`fetch`]: ProductQuery::fetch
/// [`all`]: ProductQuery::all
/// [`count`]: ProductQuery::count
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pool: SqlitePool,
    category_id: Option<i64>,
    available_only: bool,
    ordering: ProductOrdering,
    limit: Option<u32>,
}

impl ProductQuery {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        ProductQuery {
            pool,
            category_id: None,
            available_only: false,
            ordering: ProductOrdering::Name,
            limit: None,
        }
    }

    /// Restricts the listing to one category.
    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Skips products whose `available` flag is off.
    pub fn available_only(mut self) -> Self {
        self.available_only = true;
        self
    }

    pub fn ordered_by(mut self, ordering: ProductOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Streams the matching products one row at a time.
    ///
    /// The stream holds a pooled connection until it is dropped. On a
    /// single-connection pool (such as [`DbConfig::in_memory`]) any other
    /// query issued before then waits for the acquire timeout and fails
    /// with `PoolExhausted`.
    ///
    /// [`DbConfig::in_memory`]: crate::pool::DbConfig::in_memory
    pub fn fetch(&self) -> impl Stream<Item = DbResult<Product>> + '_ {
        let sql = match self.ordering {
            ProductOrdering::Name => LIST_BY_NAME,
            ProductOrdering::NewestFirst => LIST_NEWEST_FIRST,
        };

        sqlx::query_as::<_, Product>(sql)
            .bind(self.category_id)
            .bind(self.available_only)
            .bind(self.limit.map(i64::from).unwrap_or(-1))
            .fetch(&self.pool)
            .map(|row| row.map_err(DbError::from))
    }

    /// Collects the matching products.
    pub async fn all(&self) -> DbResult<Vec<Product>> {
        self.fetch().collect::<DbResult<Vec<_>>>().await
    }

    /// Counts the matching products. The limit is ignored.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(COUNT_MATCHING)
            .bind(self.category_id)
            .bind(self.available_only)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
