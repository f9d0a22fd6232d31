use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// Events starting within this many hours are flagged as starting soon.
const STARTING_SOON_HOURS: i64 = 24;

/// Time-based status shown on event cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBadge {
    Ended,
    StartingSoon,
    Open,
    Unknown,
}

impl StatusBadge {
    pub fn label(self) -> &'static str {
        match self {
            StatusBadge::Ended => "Ended",
            StatusBadge::StartingSoon => "Starting Soon",
            StatusBadge::Open => "Open for Registration",
            StatusBadge::Unknown => "Unknown",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StatusBadge::Ended => "badge-danger",
            StatusBadge::StartingSoon => "badge-warning",
            StatusBadge::Open => "badge-success",
            StatusBadge::Unknown => "badge-secondary",
        }
    }
}

pub fn status_badge(starts_at: Option<NaiveDateTime>, now: NaiveDateTime) -> StatusBadge {
    let Some(starts_at) = starts_at else {
        return StatusBadge::Unknown;
    };

    if starts_at < now {
        StatusBadge::Ended
    } else if starts_at - now < Duration::hours(STARTING_SOON_HOURS) {
        StatusBadge::StartingSoon
    } else {
        StatusBadge::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn test_window_boundaries() {
        let now = at(10, 12, 0);

        assert_eq!(status_badge(Some(at(10, 11, 59)), now), StatusBadge::Ended);
        assert_eq!(status_badge(Some(now), now), StatusBadge::StartingSoon);
        assert_eq!(status_badge(Some(at(11, 11, 59)), now), StatusBadge::StartingSoon);
        assert_eq!(status_badge(Some(at(11, 12, 0)), now), StatusBadge::Open);
        assert_eq!(status_badge(None, now), StatusBadge::Unknown);
    }

    #[test]
    fn test_advancing_now_never_moves_backward() {
        fn rank(badge: StatusBadge) -> u8 {
            match badge {
                StatusBadge::Open => 0,
                StatusBadge::StartingSoon => 1,
                StatusBadge::Ended => 2,
                StatusBadge::Unknown => 3,
            }
        }

        let starts_at = Some(at(15, 9, 30));
        let mut now = at(12, 0, 0);
        let mut previous = status_badge(starts_at, now);
        for _ in 0..(24 * 6) {
            now += Duration::hours(1);
            let current = status_badge(starts_at, now);
            assert!(rank(current) >= rank(previous), "{previous:?} -> {current:?}");
            previous = current;
        }
        assert_eq!(previous, StatusBadge::Ended);
    }

    #[test]
    fn test_missing_date_is_always_unknown() {
        for day in 1..=28 {
            assert_eq!(status_badge(None, at(day, 0, 0)), StatusBadge::Unknown);
        }
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_value(StatusBadge::StartingSoon).unwrap(),
            "starting-soon"
        );
        assert_eq!(StatusBadge::Open.label(), "Open for Registration");
        assert_eq!(StatusBadge::Ended.css_class(), "badge-danger");
    }
}
