use chrono::NaiveDate;
use egui::Color32;
use uuid::Uuid;

/// An inclusive day range. Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Both bounds shifted by the same number of days.
    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: self.start + chrono::Duration::days(days),
            end: self.end + chrono::Duration::days(days),
        }
    }
}

/// Which source entity an item was built from. Decides the commit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A milestone, rendered with its stored dates.
    Sprint,
    /// An epic, rendered with the min/max of its tasks' dates.
    Epic,
}

/// The unit rendered and dragged on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineItem {
    /// Identity of the underlying milestone or epic.
    pub id: Uuid,
    pub kind: ItemKind,
    pub name: String,
    pub range: DateRange,
    /// Display-only; drives the bar color for sprints.
    pub status: Option<String>,
    pub color: Color32,
}
