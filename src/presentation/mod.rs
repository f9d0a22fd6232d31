//! Display state derived from raw event rows.
//!
//! Everything here is pure: the current time is always passed in, so the
//! same row and the same `now` produce the same badge, labels and
//! registration state on every page.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{EventDetail, EventSummary};

pub mod attendance;
pub mod badge;
pub mod money;

pub use attendance::{attendance, registration, Attendance, RegistrationState};
pub use badge::{status_badge, StatusBadge};
pub use money::{format_currency, progress};

const DATE_DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

pub fn format_date(value: Option<NaiveDateTime>) -> String {
    value
        .map(|value| value.format(DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Funding {
    pub goal_label: String,
    pub raised_label: String,
    pub progress: u8,
}

/// Fundraising block, shown only for a positive goal.
pub fn funding(current: Option<Decimal>, goal: Option<Decimal>) -> Option<Funding> {
    let goal = goal.filter(|goal| *goal > Decimal::ZERO)?;

    Some(Funding {
        goal_label: format_currency(Some(goal)),
        raised_label: format_currency(current),
        progress: progress(current, Some(goal)),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub state: RegistrationState,
    pub label: &'static str,
    pub disabled: bool,
}

impl From<RegistrationState> for Registration {
    fn from(state: RegistrationState) -> Self {
        Self {
            state,
            label: state.label(),
            disabled: state.is_disabled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDisplay {
    pub status: StatusBadge,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub date_label: String,
    pub price_label: String,
    pub funding: Option<Funding>,
    pub attendance: Option<Attendance>,
    pub registration: Registration,
}

impl EventDisplay {
    pub fn for_summary(event: &EventSummary, now: NaiveDateTime) -> Self {
        let starts_at = event.starts_at();
        let status = status_badge(starts_at, now);
        let attendance = attendance(event.max_attendees, event.current_attendees);

        Self {
            status,
            status_label: status.label(),
            status_class: status.css_class(),
            date_label: format_date(starts_at),
            price_label: format_currency(event.ticket_price),
            funding: funding(event.current_amount, event.goal_amount),
            registration: registration(starts_at, attendance.as_ref(), now).into(),
            attendance,
        }
    }

    pub fn for_detail(event: &EventDetail, now: NaiveDateTime) -> Self {
        Self::for_summary(&event.summary(), now)
    }
}

/// A listed event with its display state.
#[derive(Debug, Clone, Serialize)]
pub struct EventCard {
    #[serde(flatten)]
    pub event: EventSummary,
    pub display: EventDisplay,
}

impl EventCard {
    pub fn new(event: EventSummary, now: NaiveDateTime) -> Self {
        let display = EventDisplay::for_summary(&event, now);
        Self { event, display }
    }
}

/// A single event with organiser details and display state.
#[derive(Debug, Clone, Serialize)]
pub struct EventPage {
    #[serde(flatten)]
    pub event: EventDetail,
    pub display: EventDisplay,
}

impl EventPage {
    pub fn new(event: EventDetail, now: NaiveDateTime) -> Self {
        let display = EventDisplay::for_detail(&event, now);
        Self { event, display }
    }
}
