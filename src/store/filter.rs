//! Composition of the event search query.
//!
//! Raw query-string values become an [`EventFilter`], the filter becomes an
//! ordered list of [`Predicate`]s, and every predicate appends one bound
//! condition to the active-events query. The unfiltered listing is the same
//! query with no predicates, so both always agree on what "active" means and
//! on ordering.

use std::num::IntErrorKind;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use thiserror::Error;

use crate::models::{EventSummary, ACTIVE_STATUS};

pub(crate) const EVENT_LISTING_SQL: &str = "SELECT e.id, e.name, e.description, e.full_description, \
e.event_date, e.event_time, e.location, e.ticket_price, e.goal_amount, e.current_amount, \
e.max_attendees, e.current_attendees, e.image_url, e.status, e.category_id, \
c.name AS category_name, o.name AS organisation_name \
FROM events e \
LEFT JOIN categories c ON e.category_id = c.id \
LEFT JOIN organisations o ON e.organisation_id = o.id \
WHERE e.status = ";

pub(crate) const EVENT_ORDERING_SQL: &str = " ORDER BY e.event_date ASC, e.id ASC";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Search parameters exactly as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub date: Option<String>,
    pub location: Option<String>,
    pub category_id: Option<String>,
    pub category: Option<String>,
}

impl SearchParams {
    /// The raw category value. `category_id` wins over `category` whenever it
    /// is present, even if it later fails to parse.
    pub fn category_value(&self) -> Option<&str> {
        non_empty(self.category_id.as_deref()).or_else(|| non_empty(self.category.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Parsed search filters. Serialized back to the client with the results.
///
/// `category_id` is wider than the column so that a numeric id no category
/// can have still filters, and matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl EventFilter {
    pub fn by_category(category_id: i32) -> Self {
        Self {
            category_id: Some(i64::from(category_id)),
            ..Self::default()
        }
    }

    pub fn from_params(params: &SearchParams) -> Result<Self, FilterError> {
        let date = non_empty(params.date.as_deref())
            .map(|raw| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|_| FilterError::InvalidDate(raw.to_string()))
            })
            .transpose()?;

        let location = non_empty(params.location.as_deref()).map(str::to_string);

        let category_id = params.category_value().and_then(parse_category_id);

        Ok(Self {
            date,
            location,
            category_id,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Predicates in the order they are appended to the query.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(date) = self.date {
            predicates.push(Predicate::EventDate(date));
        }
        if let Some(location) = &self.location {
            predicates.push(Predicate::LocationContains(location.clone()));
        }
        if let Some(category_id) = self.category_id {
            predicates.push(Predicate::Category(category_id));
        }
        predicates
    }

    /// Evaluates the same conjunction as [`search_query`] against a loaded row.
    pub fn matches(&self, event: &EventSummary) -> bool {
        event.is_active()
            && self
                .predicates()
                .iter()
                .all(|predicate| predicate.matches(event))
    }
}

/// Numeric values outside `i64` saturate; they still match no category.
fn parse_category_id(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(id) => Some(id),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(i64::MAX),
        Err(err) if *err.kind() == IntErrorKind::NegOverflow => Some(i64::MIN),
        Err(_) => {
            tracing::debug!(category = %raw, "Ignoring non-numeric category filter");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Calendar day of `event_date`, time of day ignored.
    EventDate(NaiveDate),
    /// Case-insensitive substring of `location`.
    LocationContains(String),
    Category(i64),
}

impl Predicate {
    fn push_to(self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Predicate::EventDate(date) => {
                builder.push(" AND e.event_date::date = ").push_bind(date);
            }
            Predicate::LocationContains(text) => {
                builder
                    .push(" AND e.location ILIKE ")
                    .push_bind(like_pattern(&text));
            }
            Predicate::Category(category_id) => {
                builder.push(" AND e.category_id = ").push_bind(category_id);
            }
        }
    }

    fn matches(&self, event: &EventSummary) -> bool {
        match self {
            Predicate::EventDate(date) => event
                .event_date
                .is_some_and(|event_date| event_date.date() == *date),
            Predicate::LocationContains(text) => event.location.as_deref().is_some_and(|location| {
                location.to_lowercase().contains(&text.to_lowercase())
            }),
            Predicate::Category(category_id) => event
                .category_id
                .is_some_and(|id| i64::from(id) == *category_id),
        }
    }
}

/// Wraps `text` in `%` wildcards with LIKE metacharacters escaped.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Builds the parameterized search over active events.
pub fn search_query(filter: &EventFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(EVENT_LISTING_SQL);
    builder.push_bind(ACTIVE_STATUS);
    for predicate in filter.predicates() {
        predicate.push_to(&mut builder);
    }
    builder.push(EVENT_ORDERING_SQL);
    builder
}
