use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::record::wire_date;
use crate::model::ProjectPlan;

/// The two write operations the timeline issues against the tracking
/// backend. Everything else about persistence stays behind this seam.
pub trait ScheduleService {
    fn update_milestone_dates(
        &self,
        id: Uuid,
        start: NaiveDate,
        due: NaiveDate,
    ) -> Result<(), String>;

    fn update_task_dates(&self, id: Uuid, start: NaiveDate, due: NaiveDate)
        -> Result<(), String>;
}

struct StoreInner {
    plan: ProjectPlan,
    path: Option<PathBuf>,
}

/// Plan-file-backed schedule store. Holds the last loaded plan and writes
/// date updates back to the file it came from (in-memory only for the
/// sample plan).
pub struct PlanStore {
    inner: Mutex<StoreInner>,
}

impl PlanStore {
    pub fn new(plan: ProjectPlan, path: Option<PathBuf>) -> Self {
        Self {
            inner: Mutex::new(StoreInner { plan, path }),
        }
    }

    /// A full copy of the current plan, for aggregation and refetch.
    pub fn snapshot(&self) -> ProjectPlan {
        self.lock().plan.clone()
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    /// Swap in a freshly loaded plan.
    pub fn replace(&self, plan: ProjectPlan, path: Option<PathBuf>) {
        let mut inner = self.lock();
        inner.plan = plan;
        inner.path = path;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        // A poisoned lock only means a commit thread panicked mid-write;
        // the plan data itself is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(inner: &StoreInner) -> Result<(), String> {
        match &inner.path {
            Some(path) => crate::io::save_plan(&inner.plan, path),
            None => Ok(()),
        }
    }
}

impl ScheduleService for PlanStore {
    fn update_milestone_dates(
        &self,
        id: Uuid,
        start: NaiveDate,
        due: NaiveDate,
    ) -> Result<(), String> {
        let mut inner = self.lock();
        let milestone = inner
            .plan
            .milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| format!("unknown milestone {id}"))?;
        milestone.start_date = Some(wire_date(start));
        milestone.due_date = Some(wire_date(due));
        Self::persist(&inner)
    }

    fn update_task_dates(
        &self,
        id: Uuid,
        start: NaiveDate,
        due: NaiveDate,
    ) -> Result<(), String> {
        let mut inner = self.lock();
        let task = inner
            .plan
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("unknown task {id}"))?;
        task.start_date = Some(wire_date(start));
        task.due_date = Some(wire_date(due));
        Self::persist(&inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Milestone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn milestone_update_writes_wire_dates() {
        let id = Uuid::new_v4();
        let mut plan = ProjectPlan::new("p");
        plan.milestones.push(Milestone {
            id,
            name: "Sprint 1".to_string(),
            start_date: None,
            due_date: None,
            status: "ACTIVE".to_string(),
        });
        let store = PlanStore::new(plan, None);

        store
            .update_milestone_dates(id, d(2025, 3, 1), d(2025, 3, 14))
            .unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.milestones[0].start_date.as_deref(), Some("2025-03-01"));
        assert_eq!(snap.milestones[0].due_date.as_deref(), Some("2025-03-14"));
    }

    #[test]
    fn unknown_ids_are_reported() {
        let store = PlanStore::new(ProjectPlan::new("p"), None);
        assert!(store
            .update_task_dates(Uuid::new_v4(), d(2025, 3, 1), d(2025, 3, 2))
            .is_err());
    }
}
