use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::record::wire_date;
use crate::model::{
    aggregate, view_window, DateRange, DragSession, Epic, Milestone, ProjectPlan, TaskRecord,
    TimelineItem, ViewMode, ViewWindow,
};
use crate::services::{commit_item, CommitOutcome, PlanStore};
use crate::settings::AppSettings;
use crate::ui;

/// Main application state.
pub struct TimelineApp {
    /// The plan store stands in for the tracking backend; commits go
    /// through it on background threads.
    store: Arc<PlanStore>,
    /// The rendered item list. Rebuilt wholesale from the store; the one
    /// dragged item carries its shadow range while a gesture is live.
    items: Vec<TimelineItem>,

    pub mode: ViewMode,
    anchor: NaiveDate,
    window: ViewWindow,

    /// The single in-flight gesture, if any.
    drag: Option<DragSession>,
    selected: Option<Uuid>,

    pub settings: AppSettings,
    pub show_about: bool,
    status_message: String,

    outcome_tx: Sender<CommitOutcome>,
    outcome_rx: Receiver<CommitOutcome>,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = AppSettings::load();
        let mode = settings.mode();
        let anchor = chrono::Local::now().date_naive();
        let store = Arc::new(PlanStore::new(Self::sample_plan(), None));
        let (outcome_tx, outcome_rx) = channel();

        let mut app = Self {
            store,
            items: Vec::new(),
            mode,
            anchor,
            window: view_window(mode, anchor),
            drag: None,
            selected: None,
            settings,
            show_about: false,
            status_message: "Ready".to_string(),
            outcome_tx,
            outcome_rx,
        };
        app.rebuild_items();
        app
    }

    /// Generate a sample plan for first launch.
    fn sample_plan() -> ProjectPlan {
        let today = chrono::Local::now().date_naive();
        let day = |offset: i64| wire_date(today + chrono::Duration::days(offset));

        let mut plan = ProjectPlan::new("Sample Plan");

        plan.milestones = vec![
            Milestone {
                id: Uuid::new_v4(),
                name: "Sprint 1".to_string(),
                start_date: Some(day(-21)),
                due_date: Some(day(-8)),
                status: "COMPLETED".to_string(),
            },
            Milestone {
                id: Uuid::new_v4(),
                name: "Sprint 2".to_string(),
                start_date: Some(day(-7)),
                due_date: Some(day(6)),
                status: "ACTIVE".to_string(),
            },
            Milestone {
                id: Uuid::new_v4(),
                name: "Sprint 3".to_string(),
                start_date: Some(day(7)),
                due_date: Some(day(20)),
                status: "NOT_START".to_string(),
            },
            // No dates yet: the timeline falls back to a week from today.
            Milestone {
                id: Uuid::new_v4(),
                name: "Stabilization".to_string(),
                start_date: None,
                due_date: None,
                status: "NOT_START".to_string(),
            },
        ];

        let checkout = Epic {
            id: Uuid::new_v4(),
            name: "Checkout Flow".to_string(),
        };
        let search = Epic {
            id: Uuid::new_v4(),
            name: "Search Revamp".to_string(),
        };
        // Never shows up: no task of this epic has any dates.
        let analytics = Epic {
            id: Uuid::new_v4(),
            name: "Analytics".to_string(),
        };

        let task = |name: &str, epic: Uuid, start: Option<String>, due: Option<String>| TaskRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            epic: Some(epic),
            start_date: start,
            due_date: due,
        };

        plan.tasks = vec![
            task("Cart API", checkout.id, Some(day(-10)), Some(day(-2))),
            task("Payment provider", checkout.id, Some(day(-4)), Some(day(9))),
            task("Receipt emails", checkout.id, Some(day(5)), None),
            task("Index rebuild", search.id, Some(day(2)), Some(day(12))),
            task("Query parser", search.id, Some(day(8)), Some(day(18))),
            task("Event schema", analytics.id, None, None),
        ];
        plan.epics = vec![checkout, search, analytics];
        plan
    }

    /// Rebuild the rendered list from the store. The only way items change
    /// outside of an active gesture.
    fn rebuild_items(&mut self) {
        let plan = self.store.snapshot();
        let today = chrono::Local::now().date_naive();
        self.drag = None;
        self.items = aggregate::build_items(&plan.milestones, &plan.tasks, &plan.epics, today);
    }

    fn recompute_window(&mut self) {
        self.window = view_window(self.mode, self.anchor);
    }

    // --- View navigation ---

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        self.settings.set_mode(mode);
        self.recompute_window();
    }

    pub fn set_commit_on_leave(&mut self, commit_on_leave: bool) {
        self.settings.commit_on_leave = commit_on_leave;
        self.settings.save();
    }

    pub fn step_anchor(&mut self, direction: i64) {
        self.anchor += chrono::Duration::days(direction * self.mode.step_days());
        self.recompute_window();
    }

    pub fn jump_to_today(&mut self) {
        self.anchor = chrono::Local::now().date_naive();
        self.recompute_window();
    }

    // --- Plan operations ---

    pub fn plan_name(&self) -> String {
        self.store.snapshot().name
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.store.path()
    }

    pub fn open_plan(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Plan Files", &["json"])
            .pick_file()
        {
            match crate::io::load_plan(&path) {
                Ok(plan) => {
                    self.store.replace(plan, Some(path));
                    self.rebuild_items();
                    self.selected = None;
                    self.status_message = "Plan loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    /// Refetch the plan and rebuild. Repairs any divergence left behind by
    /// failed commits.
    pub fn reload_plan(&mut self) {
        if let Some(path) = self.store.path() {
            match crate::io::load_plan(&path) {
                Ok(plan) => self.store.replace(plan, Some(path)),
                Err(e) => {
                    self.status_message = format!("Error reloading: {}", e);
                    return;
                }
            }
        }
        self.rebuild_items();
        self.selected = None;
        self.status_message = "Plan reloaded".to_string();
    }

    pub fn export_csv(&mut self) {
        if self.items.is_empty() {
            self.status_message = "Nothing to export — timeline is empty".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.plan_name());
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.items, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} items to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Commit plumbing ---

    /// Push one finished gesture to the backend on its own thread. Multiple
    /// in-flight batches may overlap; nothing orders them.
    fn spawn_commit(&mut self, item: TimelineItem, original: DateRange) {
        self.status_message = format!("Updating '{}'...", item.name);
        let store = Arc::clone(&self.store);
        let tasks = self.store.snapshot().tasks;
        let tx = self.outcome_tx.clone();
        std::thread::spawn(move || {
            let outcome = commit_item(store.as_ref(), &item, original, &tasks);
            let _ = tx.send(outcome);
        });
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.status_message = outcome.summary();
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        self.drain_outcomes();

        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::R)) {
            self.reload_plan();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Items: {}", self.items.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "{} – {}",
                                self.window.start.format("%d %b %Y"),
                                self.window.end.format("%d %b %Y")
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: timeline chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let leave_policy = self.settings.leave_policy();
            let action = ui::timeline::show_timeline(
                &mut self.items,
                &self.window,
                &mut self.drag,
                leave_policy,
                &mut self.selected,
                ui,
            );

            if action.zoom_delta > 0 {
                self.set_mode(self.mode.zoom_in());
            } else if action.zoom_delta < 0 {
                self.set_mode(self.mode.zoom_out());
            }

            if action.changed {
                if let Some(session) = &self.drag {
                    if let Some(item) = self.items.iter().find(|i| i.id == session.item_id) {
                        self.status_message = format!(
                            "'{}' {} → {}",
                            item.name,
                            item.range.start.format("%Y-%m-%d"),
                            item.range.end.format("%Y-%m-%d")
                        );
                    }
                }
            }

            if let Some((item, original)) = action.commit {
                if item.range != original {
                    self.spawn_commit(item, original);
                } else {
                    self.status_message = "Ready".to_string();
                }
            }
        });

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
