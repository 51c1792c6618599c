//! # Repository Module
//!
//! Database repository implementations for the shop catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │                                                                 │
//! │       │  db.products().list_available(None, ProductOrdering::Name)     │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── create(&self, NewProduct)     validate → category check → INSERT │
//! │  ├── get_by_id_and_slug(&self, id, slug)                               │
//! │  ├── update(&self, id, ProductUpdate)                                  │
//! │  └── query(&self) → ProductQuery   lazy, runs on fetch/all/count      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`](category::CategoryRepository) - Category CRUD, cascade delete
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and storefront listings

pub mod category;
pub mod product;

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::DbResult;

/// Opens a transaction that takes the write lock on `BEGIN`.
///
/// Required for any transaction that reads before it writes: a deferred
/// one fails with `SQLITE_BUSY` when it tries to upgrade its lock while
/// another connection is writing, without waiting on the busy timeout.
pub(crate) async fn begin_write(pool: &SqlitePool) -> DbResult<Transaction<'static, Sqlite>> {
    let tx = pool.begin_with("BEGIN IMMEDIATE").await?;
    Ok(tx)
}
