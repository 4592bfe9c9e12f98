use crate::app::TimelineApp;
use crate::model::ViewMode;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open Plan...").clicked() {
                app.open_plan();
                ui.close_menu();
            }
            if ui
                .button(format!("  {} Reload", egui_phosphor::regular::ARROWS_CLOCKWISE))
                .clicked()
            {
                app.reload_plan();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Data Folder").clicked() {
                let _ = open::that(crate::settings::config_dir());
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Range").small().weak());
            for mode in ViewMode::ALL {
                if ui.radio(app.mode == mode, mode.label()).clicked() {
                    app.set_mode(mode);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Jump to Today").clicked() {
                app.jump_to_today();
                ui.close_menu();
            }
            ui.separator();
            let mut commit_on_leave = app.settings.commit_on_leave;
            if ui
                .checkbox(&mut commit_on_leave, "Commit drag on pointer leave")
                .clicked()
            {
                app.set_commit_on_leave(commit_on_leave);
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        // Window navigation
        if ui.button(egui_phosphor::regular::CARET_LEFT).clicked() {
            app.step_anchor(-1);
        }
        if ui.button("Today").clicked() {
            app.jump_to_today();
        }
        if ui.button(egui_phosphor::regular::CARET_RIGHT).clicked() {
            app.step_anchor(1);
        }

        // Right-aligned plan name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let source = if app.file_path().is_some() { "" } else { " (sample)" };
            ui.label(
                RichText::new(format!("{}{}", app.plan_name(), source))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
