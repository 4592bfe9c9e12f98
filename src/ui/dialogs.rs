use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("About Sprintview").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label("A native project timeline viewer.");
            ui.label(
                RichText::new(
                    "Drag bars to move, drag edges to resize. Changes are \
                     pushed to the plan as soon as you let go.",
                )
                .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                    .small()
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(6.0);
            ui.separator();
            if ui.button("Close").clicked() {
                should_close = true;
            }
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
