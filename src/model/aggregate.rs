use chrono::NaiveDate;
use egui::Color32;

use super::item::{DateRange, ItemKind, TimelineItem};
use super::record::{parse_date, Epic, Milestone, TaskRecord};

/// Bar color for epics. Fixed, and distinct from every sprint status color.
pub const EPIC_COLOR: Color32 = Color32::from_rgb(171, 71, 188);

const STATUS_GRAY: Color32 = Color32::from_rgb(120, 124, 136);
const STATUS_BLUE: Color32 = Color32::from_rgb(66, 133, 244);
const STATUS_GREEN: Color32 = Color32::from_rgb(52, 168, 83);

/// Map a milestone status to its bar color. Unknown statuses read as
/// not-started.
pub fn status_color(status: &str) -> Color32 {
    match status.trim() {
        "ACTIVE" => STATUS_BLUE,
        "COMPLETED" => STATUS_GREEN,
        _ => STATUS_GRAY,
    }
}

/// Build the rendered item list from the three source collections.
///
/// `today` anchors the defaults for undated milestones, so callers pass the
/// current date in and the function stays deterministic.
///
/// Sprints come first, then epics, each in input order. An epic with no
/// tasks, or whose tasks yield no aggregate start or no aggregate end,
/// produces nothing.
pub fn build_items(
    milestones: &[Milestone],
    tasks: &[TaskRecord],
    epics: &[Epic],
    today: NaiveDate,
) -> Vec<TimelineItem> {
    let mut items = Vec::with_capacity(milestones.len() + epics.len());

    for m in milestones {
        let start = m.start_date.as_deref().and_then(parse_date).unwrap_or(today);
        let end = m
            .due_date
            .as_deref()
            .and_then(parse_date)
            .unwrap_or(today + chrono::Duration::days(7));
        items.push(TimelineItem {
            id: m.id,
            kind: ItemKind::Sprint,
            name: m.name.clone(),
            range: DateRange::new(start, end.max(start)),
            status: (!m.status.is_empty()).then(|| m.status.clone()),
            color: status_color(&m.status),
        });
    }

    for e in epics {
        if let Some(range) = epic_range(e, tasks) {
            items.push(TimelineItem {
                id: e.id,
                kind: ItemKind::Epic,
                name: e.name.clone(),
                range,
                status: None,
                color: EPIC_COLOR,
            });
        }
    }

    items
}

/// Derive an epic's range from its tasks: the minimum defined start and the
/// maximum defined due date. A task missing one bound still contributes the
/// other; a partial aggregate (only one bound found overall) is treated as
/// not yet schedulable.
fn epic_range(epic: &Epic, tasks: &[TaskRecord]) -> Option<DateRange> {
    let mut start: Option<NaiveDate> = None;
    let mut end: Option<NaiveDate> = None;
    let mut any_task = false;

    for task in tasks.iter().filter(|t| t.epic == Some(epic.id)) {
        any_task = true;
        if let Some(s) = task.start() {
            start = Some(start.map_or(s, |cur: NaiveDate| cur.min(s)));
        }
        if let Some(d) = task.due() {
            end = Some(end.map_or(d, |cur: NaiveDate| cur.max(d)));
        }
    }

    if !any_task {
        return None;
    }
    match (start, end) {
        (Some(s), Some(e)) => Some(DateRange::new(s, e.max(s))),
        _ => None,
    }
}
