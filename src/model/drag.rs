use uuid::Uuid;

use super::item::DateRange;

/// What part of the bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    ResizeLeft,
    ResizeRight,
}

/// What to do with the shadow range when the pointer leaves the chart
/// mid-gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeavePolicy {
    /// Treat leaving like releasing: commit the shadow range.
    Commit,
    /// Discard the shadow range and restore the original.
    Cancel,
}

/// Live state of the one in-flight gesture. At most one exists at a time;
/// it is created on pointer-down and destroyed on release or leave.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub item_id: Uuid,
    pub mode: DragMode,
    /// Pointer x at gesture start, in the same space as later pointer
    /// positions.
    pub origin_x: f32,
    /// The item's range when the gesture began. Candidates are always
    /// derived from this, never from the previous frame, so repeated
    /// recomputation cannot drift.
    pub original: DateRange,
}

impl DragSession {
    pub fn begin(item_id: Uuid, mode: DragMode, origin_x: f32, original: DateRange) -> Self {
        Self {
            item_id,
            mode,
            origin_x,
            original,
        }
    }

    /// Convert the total pointer travel into whole days on the current
    /// window's scale.
    pub fn days_delta(&self, pointer_x: f32, container_width: f32, total_days: i64) -> i64 {
        if container_width <= 0.0 {
            return 0;
        }
        let delta = pointer_x - self.origin_x;
        (delta / container_width * total_days as f32).round() as i64
    }

    /// The proposed range for a given day delta. Resizes clamp to a
    /// one-day minimum span; the moved edge never crosses the fixed one.
    pub fn candidate(&self, days_delta: i64) -> DateRange {
        let DateRange { start, end } = self.original;
        match self.mode {
            DragMode::Move => self.original.shifted(days_delta),
            DragMode::ResizeLeft => {
                let mut new_start = start + chrono::Duration::days(days_delta);
                if new_start >= end {
                    new_start = end - chrono::Duration::days(1);
                }
                DateRange::new(new_start, end)
            }
            DragMode::ResizeRight => {
                let mut new_end = end + chrono::Duration::days(days_delta);
                if new_end <= start {
                    new_end = start + chrono::Duration::days(1);
                }
                DateRange::new(start, new_end)
            }
        }
    }
}
