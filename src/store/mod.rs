//! Read access to events, categories and organisations.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Category, EventDetail, EventSummary, Organisation};

pub mod filter;
pub mod memory;
pub mod postgres;

pub use filter::{search_query, EventFilter, FilterError, Predicate, SearchParams};
pub use memory::MemoryEventStore;
pub use postgres::PgEventStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Active events matching every predicate of `filter`, earliest first.
    async fn search_events(&self, filter: &EventFilter) -> Result<Vec<EventSummary>, StoreError>;

    async fn list_active_events(&self) -> Result<Vec<EventSummary>, StoreError> {
        self.search_events(&EventFilter::default()).await
    }

    /// Looks up one event regardless of its status.
    async fn find_event(&self, id: i32) -> Result<Option<EventDetail>, StoreError>;

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn list_organisations(&self) -> Result<Vec<Organisation>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
