use chrono::{Datelike, Duration, NaiveDate};

/// Controls how much calendar time the timeline shows around the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Today,
    Week,
    Month,
    Quarters,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Today,
        ViewMode::Week,
        ViewMode::Month,
        ViewMode::Quarters,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Today => "Today",
            ViewMode::Week => "Week",
            ViewMode::Month => "Month",
            ViewMode::Quarters => "Quarters",
        }
    }

    /// Stable key used in the settings file.
    pub fn key(&self) -> &'static str {
        match self {
            ViewMode::Today => "today",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
            ViewMode::Quarters => "quarters",
        }
    }

    /// Parse a persisted key. Unknown keys fall back to Month.
    pub fn from_key(key: &str) -> Self {
        match key {
            "today" => ViewMode::Today,
            "week" => ViewMode::Week,
            "month" => ViewMode::Month,
            "quarters" => ViewMode::Quarters,
            _ => ViewMode::Month,
        }
    }

    /// Show less time (finer granularity).
    pub fn zoom_in(&self) -> Self {
        match self {
            ViewMode::Today => ViewMode::Today,
            ViewMode::Week => ViewMode::Today,
            ViewMode::Month => ViewMode::Week,
            ViewMode::Quarters => ViewMode::Month,
        }
    }

    /// Show more time (coarser granularity).
    pub fn zoom_out(&self) -> Self {
        match self {
            ViewMode::Today => ViewMode::Week,
            ViewMode::Week => ViewMode::Month,
            ViewMode::Month => ViewMode::Quarters,
            ViewMode::Quarters => ViewMode::Quarters,
        }
    }

    /// Stride for the back/forward navigation buttons.
    pub fn step_days(&self) -> i64 {
        match self {
            ViewMode::Today => 1,
            ViewMode::Week => 7,
            ViewMode::Month => 30,
            ViewMode::Quarters => 90,
        }
    }
}

/// The inclusive day range currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ViewWindow {
    /// Inclusive day count.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Compute the window for a mode around an anchor date.
pub fn view_window(mode: ViewMode, anchor: NaiveDate) -> ViewWindow {
    match mode {
        ViewMode::Today => ViewWindow {
            start: anchor - Duration::days(1),
            end: anchor + Duration::days(1),
        },
        ViewMode::Week => ViewWindow {
            start: anchor - Duration::days(21),
            end: anchor + Duration::days(21),
        },
        ViewMode::Month => ViewWindow {
            start: first_of_month(anchor - Duration::days(45)),
            end: last_of_month(anchor + Duration::days(45)),
        },
        ViewMode::Quarters => ViewWindow {
            start: anchor - Duration::days(180),
            end: anchor + Duration::days(180),
        },
    }
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).unwrap_or(d)
}

fn last_of_month(d: NaiveDate) -> NaiveDate {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .map(|first_next| first_next - Duration::days(1))
        .unwrap_or(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn today_window_is_three_days() {
        let w = view_window(ViewMode::Today, d(2025, 3, 15));
        assert_eq!(w.start, d(2025, 3, 14));
        assert_eq!(w.end, d(2025, 3, 16));
        assert_eq!(w.total_days(), 3);
    }

    #[test]
    fn week_window_spans_six_weeks() {
        let w = view_window(ViewMode::Week, d(2025, 3, 15));
        assert_eq!(w.start, d(2025, 2, 22));
        assert_eq!(w.end, d(2025, 4, 5));
    }

    #[test]
    fn month_window_is_calendar_aligned() {
        let w = view_window(ViewMode::Month, d(2025, 3, 15));
        // 45 days back lands in January, 45 days forward in April.
        assert_eq!(w.start, d(2025, 1, 1));
        assert_eq!(w.end, d(2025, 4, 30));
    }

    #[test]
    fn month_alignment_across_year_boundary() {
        let w = view_window(ViewMode::Month, d(2025, 12, 20));
        assert_eq!(w.start, d(2025, 11, 1));
        assert_eq!(w.end, d(2026, 2, 28));
    }

    #[test]
    fn all_modes_produce_ordered_windows() {
        for mode in ViewMode::ALL {
            for anchor in [d(2024, 2, 29), d(2025, 1, 1), d(2025, 12, 31)] {
                let w = view_window(mode, anchor);
                assert!(w.start <= w.end, "{mode:?} at {anchor}");
                assert!(w.total_days() >= 1);
            }
        }
    }

    #[test]
    fn unknown_mode_key_falls_back_to_month() {
        assert_eq!(ViewMode::from_key("fortnight"), ViewMode::Month);
        assert_eq!(ViewMode::from_key(""), ViewMode::Month);
        for mode in ViewMode::ALL {
            assert_eq!(ViewMode::from_key(mode.key()), mode);
        }
    }
}
