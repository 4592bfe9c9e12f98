use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project plan as exported by the tracking backend: the three read
/// collections the timeline consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    pub name: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub epics: Vec<Epic>,
}

impl Default for ProjectPlan {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            milestones: Vec::new(),
            tasks: Vec::new(),
            epics: Vec::new(),
        }
    }
}

impl ProjectPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A milestone record. Dates arrive as raw strings and may be absent or
/// malformed; both cases read as "no date".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// A task record. Only its epic link and date bounds matter to the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub epic: Option<Uuid>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TaskRecord {
    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_date)
    }

    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_date)
    }
}

/// An epic record. Its displayed schedule is derived from its tasks,
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    pub id: Uuid,
    pub name: String,
}

/// Try parsing a date string with several common formats.
///
/// Returns `None` for malformed input, so an unparseable date is
/// indistinguishable from a missing one everywhere downstream.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Format a date the way the backend expects it on writes.
pub fn wire_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(parse_date("2025-03-15"), Some(expected));
        assert_eq!(parse_date("15/03/2025"), Some(expected));
        assert_eq!(parse_date(" 2025-03-15 "), Some(expected));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2025-13-45"), None);
    }

    #[test]
    fn plan_parses_camel_case_export() {
        let json = r#"{
            "name": "Website Relaunch",
            "milestones": [
                { "id": "6f6d7b50-4d2b-4a6e-9d2a-0b8f4a3e1c01",
                  "name": "Sprint 1",
                  "startDate": "2025-03-01",
                  "dueDate": "2025-03-14",
                  "status": "ACTIVE" }
            ],
            "tasks": [
                { "id": "6f6d7b50-4d2b-4a6e-9d2a-0b8f4a3e1c02",
                  "name": "Design header",
                  "epic": "6f6d7b50-4d2b-4a6e-9d2a-0b8f4a3e1c03",
                  "startDate": "2025-03-02" }
            ],
            "epics": [
                { "id": "6f6d7b50-4d2b-4a6e-9d2a-0b8f4a3e1c03", "name": "Frontend" }
            ]
        }"#;
        let plan: ProjectPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.milestones.len(), 1);
        assert_eq!(plan.milestones[0].status, "ACTIVE");
        assert_eq!(plan.tasks[0].due_date, None);
        assert!(plan.tasks[0].start().is_some());
        assert_eq!(plan.tasks[0].due(), None);
        assert_eq!(plan.tasks[0].epic, Some(plan.epics[0].id));
    }

    #[test]
    fn missing_collections_default_empty() {
        let plan: ProjectPlan = serde_json::from_str(r#"{ "name": "Empty" }"#).unwrap();
        assert!(plan.milestones.is_empty());
        assert!(plan.tasks.is_empty());
        assert!(plan.epics.is_empty());
    }
}
