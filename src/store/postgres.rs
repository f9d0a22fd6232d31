use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::filter::search_query;
use super::{EventFilter, EventStore, StoreError};
use crate::config::DatabaseConfig;
use crate::models::{Category, EventDetail, EventSummary, Organisation};

const EVENT_DETAIL_SQL: &str = "SELECT e.id, e.name, e.description, e.full_description, \
e.event_date, e.event_time, e.location, e.ticket_price, e.goal_amount, e.current_amount, \
e.max_attendees, e.current_attendees, e.image_url, e.status, e.category_id, e.organisation_id, \
c.name AS category_name, o.name AS organisation_name, \
o.description AS organisation_description, o.contact_email, o.contact_phone, o.website \
FROM events e \
LEFT JOIN categories c ON e.category_id = c.id \
LEFT JOIN organisations o ON e.organisation_id = o.id \
WHERE e.id = $1";

const CATEGORIES_SQL: &str = "SELECT id, name FROM categories ORDER BY name";

const ORGANISATIONS_SQL: &str = "SELECT id, name, description, contact_email, contact_phone, website \
FROM organisations ORDER BY name";

/// Event store backed by a bounded PostgreSQL pool. Requests beyond
/// `max_connections` wait for a free connection up to the acquire timeout.
#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn search_events(&self, filter: &EventFilter) -> Result<Vec<EventSummary>, StoreError> {
        let mut query = search_query(filter);
        tracing::debug!(sql = %query.sql(), ?filter, "Running event search");

        let events = query
            .build_query_as::<EventSummary>()
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn find_event(&self, id: i32) -> Result<Option<EventDetail>, StoreError> {
        let event = sqlx::query_as::<_, EventDetail>(EVENT_DETAIL_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(CATEGORIES_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    async fn list_organisations(&self) -> Result<Vec<Organisation>, StoreError> {
        let organisations = sqlx::query_as::<_, Organisation>(ORGANISATIONS_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(organisations)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
