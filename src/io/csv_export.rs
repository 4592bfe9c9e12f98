use crate::model::{ItemKind, TimelineItem};
use std::path::Path;

/// Export the aggregated timeline to a semicolon-delimited CSV file.
///
/// Columns: Name ; Type ; Start Date ; Due Date ; Status
/// Dates are formatted as YYYY-MM-DD. Returns the number of rows written.
pub fn export_csv(items: &[TimelineItem], path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Name", "Type", "Start Date", "Due Date", "Status"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for item in items {
        let kind = match item.kind {
            ItemKind::Sprint => "Sprint",
            ItemKind::Epic => "Epic",
        };
        wtr.write_record([
            item.name.as_str(),
            kind,
            &item.range.start.format("%Y-%m-%d").to_string(),
            &item.range.end.format("%Y-%m-%d").to_string(),
            item.status.as_deref().unwrap_or(""),
        ])
        .map_err(|e| format!("Failed to write row '{}': {}", item.name, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(items.len())
}
