pub mod aggregate;
pub mod drag;
pub mod item;
pub mod layout;
pub mod record;
pub mod view_range;

pub use drag::{DragMode, DragSession, LeavePolicy};
pub use item::{DateRange, ItemKind, TimelineItem};
pub use record::{Epic, Milestone, ProjectPlan, TaskRecord};
pub use view_range::{view_window, ViewMode, ViewWindow};
