//! In-process event store.
//!
//! Holds rows in plain vectors and answers queries with the same semantics as
//! [`PgEventStore`](super::PgEventStore): joins by id, active-only search
//! through [`EventFilter::matches`], ascending date order with undated events
//! last, names sorted for categories and organisations.

use async_trait::async_trait;

use super::{EventFilter, EventStore, StoreError};
use crate::models::{Category, EventDetail, EventSummary, Organisation};

#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Vec<EventDetail>,
    categories: Vec<Category>,
    organisations: Vec<Organisation>,
    unavailable: Option<String>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_organisation(mut self, organisation: Organisation) -> Self {
        self.organisations.push(organisation);
        self
    }

    /// Adds an event. Joined names are filled in from the registered
    /// categories and organisations at query time.
    pub fn with_event(mut self, event: EventDetail) -> Self {
        self.events.push(event);
        self
    }

    /// Makes every operation fail as if the database were unreachable.
    pub fn unavailable(mut self, reason: impl Into<String>) -> Self {
        self.unavailable = Some(reason.into());
        self
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match &self.unavailable {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn joined(&self, event: &EventDetail) -> EventDetail {
        let mut event = event.clone();

        let category = event
            .category_id
            .and_then(|id| self.categories.iter().find(|category| category.id == id));
        event.category_name = category.map(|category| category.name.clone());

        let organisation = event.organisation_id.and_then(|id| {
            self.organisations
                .iter()
                .find(|organisation| organisation.id == id)
        });
        event.organisation_name = organisation.map(|o| o.name.clone());
        event.organisation_description = organisation.and_then(|o| o.description.clone());
        event.contact_email = organisation.and_then(|o| o.contact_email.clone());
        event.contact_phone = organisation.and_then(|o| o.contact_phone.clone());
        event.website = organisation.and_then(|o| o.website.clone());

        event
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn search_events(&self, filter: &EventFilter) -> Result<Vec<EventSummary>, StoreError> {
        self.check_available()?;

        let mut events: Vec<EventSummary> = self
            .events
            .iter()
            .map(|event| self.joined(event).summary())
            .filter(|event| filter.matches(event))
            .collect();
        events.sort_by_key(|event| (event.event_date.is_none(), event.event_date, event.id));

        Ok(events)
    }

    async fn find_event(&self, id: i32) -> Result<Option<EventDetail>, StoreError> {
        self.check_available()?;

        Ok(self
            .events
            .iter()
            .find(|event| event.id == id)
            .map(|event| self.joined(event)))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.check_available()?;

        let mut categories = self.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_organisations(&self) -> Result<Vec<Organisation>, StoreError> {
        self.check_available()?;

        let mut organisations = self.organisations.clone();
        organisations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(organisations)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
