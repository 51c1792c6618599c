//! # Category Repository
//!
//! Database operations for categories.
//!
//! ## Key Operations
//! - CRUD with slug uniqueness enforced by the store
//! - Cascade delete of a category's products
//! - Lazy listing of a category's products
//!
//! ## Cascade Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    delete(category_id)                                  │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    SELECT COUNT(*) FROM product WHERE category_id = ?   → n            │
//! │    DELETE FROM category WHERE id = ?                                   │
//! │         │                                                               │
//! │         └── ON DELETE CASCADE removes the n products                   │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Either the category and all n products are gone, or nothing is.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::begin_write;
use crate::repository::product::ProductQuery;
use shop_core::{Category, CategoryUpdate, NewCategory};

/// Repository for category database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CategoryRepository::new(pool);
///
/// let clothing = repo.create(NewCategory::new("Clothing", "clothing")).await?;
/// let shirts = repo.products(clothing.id).all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - Stored category with its assigned id
    /// * `Err(DbError::Validation)` - Name or slug breaks a field rule
    /// * `Err(DbError::UniqueViolation)` - Slug already taken
    pub async fn create(&self, new: NewCategory) -> DbResult<Category> {
        new.validate()?;

        debug!(slug = %new.slug, "Inserting category");

        let result = sqlx::query("INSERT INTO category (name, slug) VALUES (?1, ?2)")
            .bind(&new.name)
            .bind(&new.slug)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).with_duplicate_value(&new.slug))?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: new.name,
            slug: new.slug,
        })
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM category WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Gets a category by its slug.
    pub async fn get_by_slug(&self, slug: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM category WHERE slug = ?1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Lists every category, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM category ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Applies a partial change to a category.
    ///
    /// ## Returns
    /// * `Ok(Category)` - The category as stored after the change
    /// * `Err(DbError::NotFound)` - No category with this id
    /// * `Err(DbError::Validation)` - A changed field breaks a rule
    /// * `Err(DbError::UniqueViolation)` - New slug already taken
    pub async fn update(&self, id: i64, update: CategoryUpdate) -> DbResult<Category> {
        debug!(id = %id, "Updating category");

        let mut tx = begin_write(&self.pool).await?;

        let current = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM category WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Category", id))?;

        let next = update.apply_to(&current)?;

        sqlx::query("UPDATE category SET name = ?2, slug = ?3 WHERE id = ?1")
            .bind(next.id)
            .bind(&next.name)
            .bind(&next.slug)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::from(e).with_duplicate_value(&next.slug))?;

        tx.commit().await?;

        Ok(next)
    }

    /// Changes a category's name.
    pub async fn rename(&self, id: i64, name: impl Into<String>) -> DbResult<Category> {
        self.update(id, CategoryUpdate::rename(name)).await
    }

    /// Changes a category's slug.
    pub async fn reslug(&self, id: i64, slug: impl Into<String>) -> DbResult<Category> {
        self.update(id, CategoryUpdate::reslug(slug)).await
    }

    /// Deletes a category together with all of its products.
    ///
    /// ## Returns
    /// * `Ok(n)` - Number of products removed with the category
    /// * `Err(DbError::NotFound)` - No category with this id
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        debug!(id = %id, "Deleting category");

        let mut tx = begin_write(&self.pool).await?;

        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE category_id = ?1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM category WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        tx.commit().await?;

        debug!(id = %id, products = products, "Category deleted with its products");
        Ok(products as u64)
    }

    /// Returns the products of a category, ordered by name.
    ///
    /// Nothing is read until the query is consumed, and it can be consumed
    /// again to re-read the current rows.
    pub fn products(&self, id: i64) -> ProductQuery {
        ProductQuery::new(self.pool.clone()).category(id)
    }

    /// Counts categories.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM category")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use shop_core::{Money, NewProduct, ValidationError};
    use std::collections::HashSet;
    use tempfile::TempDir;
    use tokio_stream::StreamExt;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        let repo = db.categories();

        let created = repo
            .create(NewCategory::new("Clothing", "clothing"))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.to_string(), "Clothing");

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_slug = repo.get_by_slug("clothing").await.unwrap().unwrap();
        assert_eq!(by_slug, created);

        assert!(repo.get_by_id(created.id + 1).await.unwrap().is_none());
        assert!(repo.get_by_slug("shoes").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let db = test_db().await;
        let repo = db.categories();

        let err = repo
            .create(NewCategory::new("A".repeat(201), "ok"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(ValidationError::TooLong { .. })));

        let err = repo
            .create(NewCategory::new("Sale", "summer sale"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let db = test_db().await;
        let repo = db.categories();

        repo.create(NewCategory::new("Sale", "sale")).await.unwrap();

        let err = repo
            .create(NewCategory::new("Another Sale", "sale"))
            .await
            .unwrap_err();

        assert!(err.is_integrity_violation());
        match err {
            DbError::UniqueViolation { value, .. } => assert_eq!(value, "sale"),
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    /// File-backed database with a real multi-connection pool.
    async fn shared_db(dir: &TempDir) -> Database {
        let config = DbConfig::new(dir.path().join("shop.db")).max_connections(8);
        Database::new(config).await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_slug_exactly_one_wins() {
        let dir = TempDir::new().unwrap();
        let db = shared_db(&dir).await;

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let repo = db.categories();
                tokio::spawn(async move { repo.create(NewCategory::new(format!("Sale {i}"), "sale")).await })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(DbError::UniqueViolation { value, .. }) => {
                    assert_eq!(value, "sale");
                    duplicates += 1;
                }
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 7);
        assert_eq!(db.categories().count().await.unwrap(), 1);
        db.close().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_renames_and_deletes_serialize() {
        let dir = TempDir::new().unwrap();
        let db = shared_db(&dir).await;

        let mut ids = Vec::new();
        for i in 0..10 {
            let category = db
                .categories()
                .create(NewCategory::new(format!("C{i}"), format!("c-{i}")))
                .await
                .unwrap();
            db.products()
                .create(NewProduct::new(category.id, "Item", "item", Money::from_cents(100)))
                .await
                .unwrap();
            ids.push(category.id);
        }

        let tasks: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let repo = db.categories();
                tokio::spawn(async move {
                    if i % 2 == 0 {
                        repo.delete(id).await.map(|_| ())
                    } else {
                        repo.rename(id, format!("Renamed {i}")).await.map(|_| ())
                    }
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(db.categories().count().await.unwrap(), 5);
        assert_eq!(db.products().count().await.unwrap(), 5);
        db.close().await;
    }

    #[tokio::test]
    async fn test_slugs_stay_unique() {
        let db = test_db().await;
        let repo = db.categories();

        for slug in ["a", "b", "a", "c", "b", "d"] {
            let _ = repo.create(NewCategory::new(slug.to_uppercase(), slug)).await;
        }

        let categories = repo.list().await.unwrap();
        let slugs: HashSet<_> = categories.iter().map(|c| c.slug.clone()).collect();
        assert_eq!(slugs.len(), categories.len());
        assert_eq!(categories.len(), 4);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_name() {
        let db = test_db().await;
        let repo = db.categories();

        for (name, slug) in [("Shoes", "shoes"), ("Accessories", "accessories"), ("Clothing", "clothing")] {
            repo.create(NewCategory::new(name, slug)).await.unwrap();
        }

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Accessories", "Clothing", "Shoes"]);
    }

    #[tokio::test]
    async fn test_rename_and_reslug() {
        let db = test_db().await;
        let repo = db.categories();

        let clothing = repo
            .create(NewCategory::new("Clothing", "clothing"))
            .await
            .unwrap();
        repo.create(NewCategory::new("Shoes", "shoes")).await.unwrap();

        let renamed = repo.rename(clothing.id, "Apparel").await.unwrap();
        assert_eq!(renamed.name, "Apparel");
        assert_eq!(renamed.slug, "clothing");

        let reslugged = repo.reslug(clothing.id, "apparel").await.unwrap();
        assert_eq!(reslugged.slug, "apparel");
        assert!(repo.get_by_slug("clothing").await.unwrap().is_none());

        let err = repo.reslug(clothing.id, "shoes").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        let err = repo.rename(clothing.id, "").await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = repo.rename(9999, "Nope").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let stored = repo.get_by_id(clothing.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Apparel");
        assert_eq!(stored.slug, "apparel");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_products() {
        let db = test_db().await;
        let categories = db.categories();
        let products = db.products();

        let clothing = categories
            .create(NewCategory::new("Clothing", "clothing"))
            .await
            .unwrap();
        let shoes = categories
            .create(NewCategory::new("Shoes", "shoes"))
            .await
            .unwrap();

        for (name, slug) in [("T-Shirt", "t-shirt"), ("Jeans", "jeans")] {
            products
                .create(NewProduct::new(clothing.id, name, slug, Money::from_cents(1999)))
                .await
                .unwrap();
        }
        let boots = products
            .create(NewProduct::new(shoes.id, "Boots", "boots", Money::from_cents(8999)))
            .await
            .unwrap();

        let removed = categories.delete(clothing.id).await.unwrap();
        assert_eq!(removed, 2);

        assert!(categories.get_by_id(clothing.id).await.unwrap().is_none());
        assert_eq!(categories.products(clothing.id).count().await.unwrap(), 0);
        assert_eq!(products.count().await.unwrap(), 1);
        assert!(products.get_by_id(boots.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_category() {
        let db = test_db().await;

        let err = db.categories().delete(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_products_is_lazy_and_restartable() {
        let db = test_db().await;
        let categories = db.categories();
        let products = db.products();

        let clothing = categories
            .create(NewCategory::new("Clothing", "clothing"))
            .await
            .unwrap();

        // Built before any product exists; nothing has been read yet.
        let listing = categories.products(clothing.id);

        for (name, slug) in [("Socks", "socks"), ("Hat", "hat")] {
            products
                .create(NewProduct::new(clothing.id, name, slug, Money::from_cents(500)))
                .await
                .unwrap();
        }

        let first: Vec<_> = listing
            .fetch()
            .map(|p| p.unwrap().name)
            .collect()
            .await;
        assert_eq!(first, vec!["Hat", "Socks"]);

        let second: Vec<_> = listing
            .fetch()
            .map(|p| p.unwrap().name)
            .collect()
            .await;
        assert_eq!(second, first);
    }
}
