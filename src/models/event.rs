use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored value of `events.status` for events that are listed and searchable.
pub const ACTIVE_STATUS: &str = "active";

/// An event row as returned by the listing and search queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventSummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub event_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub ticket_price: Option<Decimal>,
    pub goal_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub max_attendees: Option<i32>,
    pub current_attendees: Option<i32>,
    pub image_url: Option<String>,
    pub status: String,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    #[serde(rename = "organization_name")]
    pub organisation_name: Option<String>,
}

impl EventSummary {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }

    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        starts_at(self.event_date, self.event_time)
    }
}

/// Start of an event. A separate `event_time` replaces the time of day
/// carried by `event_date`.
fn starts_at(date: Option<NaiveDateTime>, time: Option<NaiveTime>) -> Option<NaiveDateTime> {
    let date = date?;
    Some(match time {
        Some(time) => date.date().and_time(time),
        None => date,
    })
}

/// A single event joined with its category and the organiser's contact details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub event_date: Option<NaiveDateTime>,
    pub event_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub ticket_price: Option<Decimal>,
    pub goal_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub max_attendees: Option<i32>,
    pub current_attendees: Option<i32>,
    pub image_url: Option<String>,
    pub status: String,
    pub category_id: Option<i32>,
    pub organisation_id: Option<i32>,
    pub category_name: Option<String>,
    #[serde(rename = "organization_name")]
    pub organisation_name: Option<String>,
    #[serde(rename = "organization_description")]
    pub organisation_description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
}

impl EventDetail {
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        starts_at(self.event_date, self.event_time)
    }

    /// The listing-shaped view of this event.
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            full_description: self.full_description.clone(),
            event_date: self.event_date,
            event_time: self.event_time,
            location: self.location.clone(),
            ticket_price: self.ticket_price,
            goal_amount: self.goal_amount,
            current_amount: self.current_amount,
            max_attendees: self.max_attendees,
            current_attendees: self.current_attendees,
            image_url: self.image_url.clone(),
            status: self.status.clone(),
            category_id: self.category_id,
            category_name: self.category_name.clone(),
            organisation_name: self.organisation_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn detail() -> EventDetail {
        EventDetail {
            id: 7,
            name: "Harbour Fun Run".to_string(),
            description: None,
            full_description: None,
            event_date: NaiveDate::from_ymd_opt(2025, 11, 2)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            event_time: None,
            location: Some("Sydney".to_string()),
            ticket_price: None,
            goal_amount: None,
            current_amount: None,
            max_attendees: None,
            current_attendees: None,
            image_url: None,
            status: ACTIVE_STATUS.to_string(),
            category_id: Some(2),
            organisation_id: Some(1),
            category_name: Some("Fun Run".to_string()),
            organisation_name: Some("Harbour Trust".to_string()),
            organisation_description: None,
            contact_email: None,
            contact_phone: None,
            website: None,
        }
    }

    #[test]
    fn test_starts_at_prefers_event_time() {
        let mut event = detail();
        event.event_time = NaiveTime::from_hms_opt(9, 30, 0);

        let starts_at = event.starts_at().unwrap();
        assert_eq!(starts_at.to_string(), "2025-11-02 09:30:00");
    }

    #[test]
    fn test_starts_at_without_date_is_none() {
        let mut event = detail();
        event.event_date = None;
        event.event_time = NaiveTime::from_hms_opt(9, 30, 0);

        assert!(event.starts_at().is_none());
    }

    #[test]
    fn test_summary_keeps_joined_names() {
        let summary = detail().summary();
        assert!(summary.is_active());
        assert_eq!(summary.category_name.as_deref(), Some("Fun Run"));
        assert_eq!(summary.organisation_name.as_deref(), Some("Harbour Trust"));
    }

    #[test]
    fn test_organisation_fields_keep_client_names() {
        let json = serde_json::to_value(detail()).unwrap();
        assert_eq!(json["organization_name"], "Harbour Trust");
        assert!(json.get("organisation_name").is_none());
    }
}
