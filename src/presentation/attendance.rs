use chrono::NaiveDateTime;
use serde::Serialize;

/// Capacity figures for events that cap attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attendance {
    pub current: i32,
    pub max: i32,
    pub remaining: i32,
}

impl Attendance {
    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }
}

/// `None` when the event has no capacity limit.
pub fn attendance(max_attendees: Option<i32>, current_attendees: Option<i32>) -> Option<Attendance> {
    let max = max_attendees?;
    let current = current_attendees.unwrap_or(0).max(0);

    Some(Attendance {
        current,
        max,
        remaining: max.saturating_sub(current).max(0),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationState {
    Ended,
    Full,
    Open,
}

impl RegistrationState {
    pub fn label(self) -> &'static str {
        match self {
            RegistrationState::Ended => "Event Ended",
            RegistrationState::Full => "Fully Booked",
            RegistrationState::Open => "Register Now",
        }
    }

    pub fn is_disabled(self) -> bool {
        !matches!(self, RegistrationState::Open)
    }
}

/// State of the registration control. An ended event wins over a full one.
pub fn registration(
    starts_at: Option<NaiveDateTime>,
    attendance: Option<&Attendance>,
    now: NaiveDateTime,
) -> RegistrationState {
    if starts_at.is_some_and(|starts_at| starts_at < now) {
        RegistrationState::Ended
    } else if attendance.is_some_and(Attendance::is_full) {
        RegistrationState::Full
    } else {
        RegistrationState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 10)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_no_capacity_means_no_attendance() {
        assert_eq!(attendance(None, Some(40)), None);
    }

    #[test]
    fn test_remaining_is_clamped() {
        assert_eq!(attendance(Some(10), Some(10)).unwrap().remaining, 0);
        assert_eq!(attendance(Some(10), Some(11)).unwrap().remaining, 0);
        assert_eq!(attendance(Some(10), None).unwrap().remaining, 10);
        assert_eq!(
            attendance(Some(10), Some(-3)),
            Some(Attendance {
                current: 0,
                max: 10,
                remaining: 10
            })
        );
    }

    #[test]
    fn test_full_event_disables_registration() {
        let full = attendance(Some(10), Some(10));
        let state = registration(Some(now() + Duration::days(3)), full.as_ref(), now());

        assert_eq!(state, RegistrationState::Full);
        assert!(state.is_disabled());
        assert_eq!(state.label(), "Fully Booked");
    }

    #[test]
    fn test_ended_takes_precedence_over_full() {
        let full = attendance(Some(10), Some(12));
        let state = registration(Some(now() - Duration::hours(1)), full.as_ref(), now());
        assert_eq!(state, RegistrationState::Ended);
        assert!(state.is_disabled());
    }

    #[test]
    fn test_open_by_default() {
        let spots = attendance(Some(10), Some(3));
        assert_eq!(
            registration(Some(now() + Duration::hours(2)), spots.as_ref(), now()),
            RegistrationState::Open
        );
        assert_eq!(registration(None, None, now()), RegistrationState::Open);
        assert!(!RegistrationState::Open.is_disabled());
    }
}
