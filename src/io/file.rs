use crate::model::ProjectPlan;
use std::path::Path;

/// Save a plan to a JSON file.
pub fn save_plan(plan: &ProjectPlan, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(plan).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}

/// Load a plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<ProjectPlan, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&json).map_err(|e| e.to_string())
}
