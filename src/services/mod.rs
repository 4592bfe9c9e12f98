pub mod commit;
pub mod schedule;

pub use commit::{commit_item, CommitOutcome};
pub use schedule::{PlanStore, ScheduleService};
