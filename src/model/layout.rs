use chrono::NaiveDate;

use super::item::DateRange;
use super::view_range::ViewWindow;

/// Horizontal placement of a bar, as fractions of the window width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPlacement {
    pub left: f32,
    pub width: f32,
}

/// Map a date range onto the window's horizontal axis.
///
/// Day counts are inclusive. A range outside the window still gets one
/// day-width so the bar stays visible and grabbable at the window edge;
/// that floor is deliberate, not an overflow.
pub fn place(range: DateRange, window: &ViewWindow) -> BarPlacement {
    let total = window.total_days();
    let start_offset = (range.start - window.start).num_days().clamp(0, total);
    let end_offset = ((range.end - window.start).num_days() + 1).clamp(0, total);
    let width_days = (end_offset - start_offset).max(1);
    BarPlacement {
        left: start_offset as f32 / total as f32,
        width: width_days as f32 / total as f32,
    }
}

/// Axis tick positions: one tick every 7 days from the window start, as
/// `(fraction, date)` pairs. Uses the same inclusive-day denominator as
/// [`place`], so grid lines and bar edges land on identical pixels.
pub fn week_ticks(window: &ViewWindow) -> Vec<(f32, NaiveDate)> {
    let total = window.total_days();
    let mut ticks = Vec::new();
    let mut offset = 0i64;
    while offset < total {
        ticks.push((
            offset as f32 / total as f32,
            window.start + chrono::Duration::days(offset),
        ));
        offset += 7;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn window(start: NaiveDate, end: NaiveDate) -> ViewWindow {
        ViewWindow { start, end }
    }

    #[test]
    fn single_day_item_fills_one_day_slot() {
        let w = window(d(2025, 3, 1), d(2025, 3, 10)); // 10 days
        let p = place(DateRange::new(d(2025, 3, 3), d(2025, 3, 3)), &w);
        assert_eq!(p.left, 2.0 / 10.0);
        assert_eq!(p.width, 1.0 / 10.0);
    }

    #[test]
    fn range_covering_window_spans_full_width() {
        let w = window(d(2025, 3, 1), d(2025, 3, 10));
        let p = place(DateRange::new(d(2025, 2, 1), d(2025, 4, 1)), &w);
        assert_eq!(p.left, 0.0);
        assert_eq!(p.width, 1.0);
    }

    #[test]
    fn item_outside_window_keeps_one_day_floor() {
        let w = window(d(2025, 3, 1), d(2025, 3, 10));
        // Entirely before the window: pinned at the left edge.
        let before = place(DateRange::new(d(2025, 1, 1), d(2025, 1, 5)), &w);
        assert_eq!(before.left, 0.0);
        assert_eq!(before.width, 1.0 / 10.0);
        // Entirely after: pinned at the right edge.
        let after = place(DateRange::new(d(2025, 5, 1), d(2025, 5, 5)), &w);
        assert_eq!(after.left, 1.0);
        assert_eq!(after.width, 1.0 / 10.0);
    }

    #[test]
    fn fractions_stay_in_unit_interval() {
        let w = window(d(2025, 3, 14), d(2025, 3, 16));
        for (s, e) in [
            (d(2020, 1, 1), d(2020, 1, 2)),
            (d(2025, 3, 15), d(2025, 3, 15)),
            (d(2025, 3, 10), d(2025, 3, 20)),
            (d(2030, 6, 1), d(2030, 6, 30)),
        ] {
            let p = place(DateRange::new(s, e), &w);
            assert!((0.0..=1.0).contains(&p.left));
            assert!((0.0..=1.0).contains(&p.width));
            assert!(p.width > 0.0);
        }
    }

    #[test]
    fn ticks_align_with_bar_edges() {
        let w = window(d(2025, 3, 1), d(2025, 3, 28)); // 28 days
        let ticks = week_ticks(&w);
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[1].1, d(2025, 3, 8));
        // A bar starting on a tick date shares the tick's fraction exactly.
        let p = place(DateRange::new(d(2025, 3, 8), d(2025, 3, 12)), &w);
        assert_eq!(p.left, ticks[1].0);
    }

    #[test]
    fn tick_spacing_uses_inclusive_denominator() {
        let w = window(d(2025, 3, 14), d(2025, 3, 16));
        assert_eq!(w.total_days(), 3);
        let ticks = week_ticks(&w);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0], (0.0, d(2025, 3, 14)));
    }
}
