use crate::model::{DateRange, ItemKind, TaskRecord, TimelineItem};

use super::schedule::ScheduleService;

/// What a completed gesture's commit ended up doing, for the status bar.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub item_name: String,
    pub kind: ItemKind,
    /// Records whose dates were written.
    pub updated: usize,
    /// Epic tasks left untouched because a bound was missing.
    pub skipped: usize,
    /// Ids whose update calls failed.
    pub failed: Vec<uuid::Uuid>,
}

impl CommitOutcome {
    pub fn summary(&self) -> String {
        match self.kind {
            ItemKind::Sprint if self.failed.is_empty() => {
                format!("Updated '{}'", self.item_name)
            }
            ItemKind::Sprint => format!("Update of '{}' failed", self.item_name),
            ItemKind::Epic => {
                let mut s = format!("Shifted {} task(s) of '{}'", self.updated, self.item_name);
                if self.skipped > 0 {
                    s.push_str(&format!(", {} skipped", self.skipped));
                }
                if !self.failed.is_empty() {
                    s.push_str(&format!(", {} failed", self.failed.len()));
                }
                s
            }
        }
    }
}

/// Push one finished gesture's new range to the backend.
///
/// A sprint maps to a single milestone update with its new range. An epic
/// maps to a fan-out: every fully-dated task of the epic is shifted by the
/// epic's own start delta, one sequential update per task. Tasks missing a
/// bound are skipped, their schedule cannot be inferred from a shift.
///
/// Best-effort by design: a failed call is logged and counted, later calls
/// still run, and the optimistic local state is never rolled back.
pub fn commit_item(
    service: &dyn ScheduleService,
    item: &TimelineItem,
    original: DateRange,
    tasks: &[TaskRecord],
) -> CommitOutcome {
    let mut outcome = CommitOutcome {
        item_name: item.name.clone(),
        kind: item.kind,
        updated: 0,
        skipped: 0,
        failed: Vec::new(),
    };

    match item.kind {
        ItemKind::Sprint => {
            match service.update_milestone_dates(item.id, item.range.start, item.range.end) {
                Ok(()) => outcome.updated = 1,
                Err(err) => {
                    log::error!("failed to update milestone {}: {}", item.id, err);
                    outcome.failed.push(item.id);
                }
            }
        }
        ItemKind::Epic => {
            let days_diff = (item.range.start - original.start).num_days();
            for task in tasks.iter().filter(|t| t.epic == Some(item.id)) {
                let (start, due) = match (task.start(), task.due()) {
                    (Some(s), Some(d)) => (s, d),
                    _ => {
                        outcome.skipped += 1;
                        continue;
                    }
                };
                let shifted = DateRange::new(start, due).shifted(days_diff);
                match service.update_task_dates(task.id, shifted.start, shifted.end) {
                    Ok(()) => outcome.updated += 1,
                    Err(err) => {
                        log::error!("failed to update task {}: {}", task.id, err);
                        outcome.failed.push(task.id);
                    }
                }
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Milestone(Uuid, NaiveDate, NaiveDate),
        Task(Uuid, NaiveDate, NaiveDate),
    }

    /// Records every update it receives; fails for configured ids.
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<Call>>,
        failing: HashSet<Uuid>,
    }

    impl Recording {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ScheduleService for Recording {
        fn update_milestone_dates(
            &self,
            id: Uuid,
            start: NaiveDate,
            due: NaiveDate,
        ) -> Result<(), String> {
            self.calls.lock().unwrap().push(Call::Milestone(id, start, due));
            if self.failing.contains(&id) {
                Err("backend rejected".to_string())
            } else {
                Ok(())
            }
        }

        fn update_task_dates(
            &self,
            id: Uuid,
            start: NaiveDate,
            due: NaiveDate,
        ) -> Result<(), String> {
            self.calls.lock().unwrap().push(Call::Task(id, start, due));
            if self.failing.contains(&id) {
                Err("backend rejected".to_string())
            } else {
                Ok(())
            }
        }
    }

    fn sprint_item(id: Uuid, start: NaiveDate, end: NaiveDate) -> TimelineItem {
        TimelineItem {
            id,
            kind: ItemKind::Sprint,
            name: "Sprint 1".to_string(),
            range: DateRange::new(start, end),
            status: Some("ACTIVE".to_string()),
            color: egui::Color32::WHITE,
        }
    }

    fn epic_item(id: Uuid, start: NaiveDate, end: NaiveDate) -> TimelineItem {
        TimelineItem {
            id,
            kind: ItemKind::Epic,
            name: "Frontend".to_string(),
            range: DateRange::new(start, end),
            status: None,
            color: egui::Color32::WHITE,
        }
    }

    fn task(epic: Uuid, start: Option<&str>, due: Option<&str>) -> TaskRecord {
        TaskRecord {
            id: Uuid::new_v4(),
            name: "task".to_string(),
            epic: Some(epic),
            start_date: start.map(str::to_string),
            due_date: due.map(str::to_string),
        }
    }

    #[test]
    fn sprint_commit_is_a_single_milestone_update() {
        let service = Recording::default();
        let id = Uuid::new_v4();
        let item = sprint_item(id, d(2025, 3, 5), d(2025, 3, 12));
        let original = DateRange::new(d(2025, 3, 1), d(2025, 3, 8));

        let outcome = commit_item(&service, &item, original, &[]);

        assert_eq!(
            service.calls(),
            vec![Call::Milestone(id, d(2025, 3, 5), d(2025, 3, 12))]
        );
        assert_eq!(outcome.updated, 1);
        assert!(outcome.failed.is_empty());
    }

    #[test]
    fn epic_commit_fans_out_and_skips_partially_dated_tasks() {
        let service = Recording::default();
        let epic_id = Uuid::new_v4();
        // Dragged three days forward.
        let item = epic_item(epic_id, d(2025, 3, 4), d(2025, 3, 13));
        let original = DateRange::new(d(2025, 3, 1), d(2025, 3, 10));

        let a = task(epic_id, Some("2025-03-01"), Some("2025-03-06"));
        let b = task(epic_id, Some("2025-03-03"), None);
        let tasks = [a.clone(), b];

        let outcome = commit_item(&service, &item, original, &tasks);

        // Exactly one update: task B has no due date and is skipped.
        assert_eq!(
            service.calls(),
            vec![Call::Task(a.id, d(2025, 3, 4), d(2025, 3, 9))]
        );
        assert_eq!(outcome.updated, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn epic_shift_can_be_negative() {
        let service = Recording::default();
        let epic_id = Uuid::new_v4();
        let item = epic_item(epic_id, d(2025, 2, 24), d(2025, 3, 5));
        let original = DateRange::new(d(2025, 3, 1), d(2025, 3, 10));
        let a = task(epic_id, Some("2025-03-02"), Some("2025-03-08"));

        commit_item(&service, &item, original, &[a.clone()]);

        assert_eq!(
            service.calls(),
            vec![Call::Task(a.id, d(2025, 2, 25), d(2025, 3, 3))]
        );
    }

    #[test]
    fn fan_out_preserves_task_order() {
        let service = Recording::default();
        let epic_id = Uuid::new_v4();
        let item = epic_item(epic_id, d(2025, 3, 2), d(2025, 3, 11));
        let original = DateRange::new(d(2025, 3, 1), d(2025, 3, 10));
        let tasks: Vec<TaskRecord> = (0..4)
            .map(|i| task(epic_id, Some("2025-03-01"), Some(&format!("2025-03-0{}", i + 2))))
            .collect();

        commit_item(&service, &item, original, &tasks);

        let calls = service.calls();
        assert_eq!(calls.len(), 4);
        for (call, task) in calls.iter().zip(&tasks) {
            assert!(matches!(call, Call::Task(id, _, _) if *id == task.id));
        }
    }

    #[test]
    fn one_failing_task_does_not_abort_the_rest() {
        let epic_id = Uuid::new_v4();
        let a = task(epic_id, Some("2025-03-01"), Some("2025-03-02"));
        let b = task(epic_id, Some("2025-03-03"), Some("2025-03-04"));
        let c = task(epic_id, Some("2025-03-05"), Some("2025-03-06"));
        let service = Recording {
            failing: HashSet::from([b.id]),
            ..Default::default()
        };
        let item = epic_item(epic_id, d(2025, 3, 2), d(2025, 3, 7));
        let original = DateRange::new(d(2025, 3, 1), d(2025, 3, 6));

        let outcome = commit_item(&service, &item, original, &[a, b.clone(), c]);

        assert_eq!(service.calls().len(), 3);
        assert_eq!(outcome.updated, 2);
        assert_eq!(outcome.failed, vec![b.id]);
        assert!(outcome.summary().contains("1 failed"));
    }

    #[test]
    fn tasks_of_other_epics_are_untouched() {
        let service = Recording::default();
        let epic_id = Uuid::new_v4();
        let other = task(Uuid::new_v4(), Some("2025-03-01"), Some("2025-03-02"));
        let item = epic_item(epic_id, d(2025, 3, 2), d(2025, 3, 7));
        let original = DateRange::new(d(2025, 3, 1), d(2025, 3, 6));

        let outcome = commit_item(&service, &item, original, &[other]);

        assert!(service.calls().is_empty());
        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.skipped, 0);
    }
}
