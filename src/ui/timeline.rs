use crate::model::{
    layout, DateRange, DragMode, DragSession, ItemKind, LeavePolicy, TimelineItem, ViewWindow,
};
use crate::ui::theme;
use chrono::Datelike;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_PADDING: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Result details from interactions in the timeline chart.
#[derive(Debug, Clone, Default)]
pub struct TimelineAction {
    /// An item's shadow range changed this frame.
    pub changed: bool,
    /// A gesture finished and its shadow range should be pushed to the
    /// backend: (item with the new range, range it had at gesture start).
    pub commit: Option<(TimelineItem, DateRange)>,
    /// Ctrl+Scroll zoom request: positive steps to a finer view mode.
    pub zoom_delta: i32,
}

/// Render the timeline chart and run the drag state machine.
///
/// `drag` is the single in-flight gesture, owned by the caller; this
/// function is its only writer. During a gesture the dragged item's `range`
/// holds the shadow copy; the captured original travels in the session and
/// is restored on cancel.
pub fn show_timeline(
    items: &mut [TimelineItem],
    window: &ViewWindow,
    drag: &mut Option<DragSession>,
    leave_policy: LeavePolicy,
    selected: &mut Option<Uuid>,
    ui: &mut Ui,
) -> TimelineAction {
    let mut action = TimelineAction::default();
    let available = ui.available_size();
    let chart_height = HEADER_HEIGHT + (items.len() as f32 * (ROW_HEIGHT + ROW_PADDING)) + 40.0;

    // Ctrl+Scroll steps the view mode
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            action.zoom_delta = 1;
        } else if scroll_delta.y < 0.0 {
            action.zoom_delta = -1;
        }
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let chart_width = ui.available_width();
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let chart_rect = response.rect;
            let total_days = window.total_days();
            let mut consumed_click = false;

            painter.rect_filled(chart_rect, 0.0, theme::BG_DARK);

            draw_header(&painter, origin, window, chart_width);
            draw_today_line(&painter, origin, window, chart_width, chart_height);

            // Alternating row backgrounds
            for i in 0..items.len() {
                let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING);
                let row_bg = if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(origin.x, y),
                        Vec2::new(chart_width, ROW_HEIGHT + ROW_PADDING),
                    ),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + ROW_HEIGHT + ROW_PADDING),
                        Pos2::new(origin.x + chart_width, y + ROW_HEIGHT + ROW_PADDING),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
            }

            // Item bars
            for (i, item) in items.iter_mut().enumerate() {
                let y =
                    origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_PADDING) + ROW_PADDING;
                let is_selected = *selected == Some(item.id);

                let bar_rect =
                    draw_item_bar(&painter, origin, window, chart_width, item, y, is_selected);

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("timeline-bar", item.id)),
                    Sense::click_and_drag(),
                );
                let left_handle_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.left() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.left() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );
                let right_handle_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );
                let left_response = ui.interact(
                    left_handle_rect.expand(4.0),
                    ui.make_persistent_id(("timeline-resize-left", item.id)),
                    Sense::drag(),
                );
                let right_response = ui.interact(
                    right_handle_rect.expand(4.0),
                    ui.make_persistent_id(("timeline-resize-right", item.id)),
                    Sense::drag(),
                );

                if bar_response.clicked() {
                    *selected = Some(item.id);
                    consumed_click = true;
                }

                // Gesture start. One session at a time; edge handles win
                // over the bar body.
                if drag.is_none() {
                    let started = if left_response.drag_started() {
                        Some((DragMode::ResizeLeft, &left_response))
                    } else if right_response.drag_started() {
                        Some((DragMode::ResizeRight, &right_response))
                    } else if bar_response.drag_started() {
                        Some((DragMode::Move, &bar_response))
                    } else {
                        None
                    };
                    if let Some((mode, response)) = started {
                        let ptr_x = response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                        *drag = Some(DragSession::begin(item.id, mode, ptr_x, item.range));
                        *selected = Some(item.id);
                        consumed_click = true;
                    }
                }

                // Gesture update: recompute the shadow range from the
                // session's original, never from the previous frame.
                let session_for_item = drag.as_ref().filter(|s| s.item_id == item.id).cloned();
                if let Some(session) = session_for_item {
                    let active_response = match session.mode {
                        DragMode::Move => &bar_response,
                        DragMode::ResizeLeft => &left_response,
                        DragMode::ResizeRight => &right_response,
                    };
                    if active_response.dragged() {
                        ui.ctx().set_cursor_icon(match session.mode {
                            DragMode::Move => egui::CursorIcon::Grab,
                            _ => egui::CursorIcon::ResizeHorizontal,
                        });
                        let ptr_x = active_response
                            .interact_pointer_pos()
                            .map(|p| p.x)
                            .unwrap_or(session.origin_x);
                        let delta = session.days_delta(ptr_x, chart_width, total_days);
                        let candidate = session.candidate(delta);
                        if candidate != item.range {
                            item.range = candidate;
                            action.changed = true;
                        }
                    }

                    if active_response.drag_stopped() {
                        *drag = None;
                        action.commit = Some((item.clone(), session.original));
                    }
                }

                // Handle affordances
                if is_selected || left_response.hovered() || right_response.hovered() {
                    if left_response.hovered() || right_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    } else if bar_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    let handle_h = bar_rect.height() * 0.55;
                    let handle_y = bar_rect.center().y - handle_h / 2.0;
                    let lh = Rect::from_min_size(
                        Pos2::new(bar_rect.left() - 1.5, handle_y),
                        Vec2::new(4.0, handle_h),
                    );
                    let rh = Rect::from_min_size(
                        Pos2::new(bar_rect.right() - 2.5, handle_y),
                        Vec2::new(4.0, handle_h),
                    );
                    painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
                    painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
                }

                // Tooltip on hover
                if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("timeline-tip", item.id)),
                        |ui| {
                            ui.strong(&item.name);
                            ui.label(format!(
                                "{} → {}",
                                item.range.start.format("%d/%m/%Y"),
                                item.range.end.format("%d/%m/%Y"),
                            ));
                            match item.kind {
                                ItemKind::Sprint => {
                                    if let Some(status) = &item.status {
                                        ui.label(format!("Status: {}", status));
                                    }
                                }
                                ItemKind::Epic => {
                                    ui.label("Epic (dates derived from tasks)");
                                }
                            }
                        },
                    );
                }
            }

            // Pointer left the chart mid-gesture: end it per policy.
            if drag.is_some() {
                let pointer = ui.input(|i| i.pointer.latest_pos());
                let outside = pointer.map(|p| !chart_rect.contains(p)).unwrap_or(true);
                if outside {
                    if let Some(session) = drag.take() {
                        if let Some(item) = items.iter_mut().find(|it| it.id == session.item_id) {
                            match leave_policy {
                                LeavePolicy::Commit => {
                                    action.commit = Some((item.clone(), session.original));
                                }
                                LeavePolicy::Cancel => {
                                    item.range = session.original;
                                    action.changed = true;
                                }
                            }
                        }
                    }
                }
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected = None;
            }
        });

    action
}

/// Pixel x for a window fraction.
fn frac_x(origin: Pos2, width: f32, frac: f32) -> f32 {
    origin.x + frac * width
}

fn draw_header(painter: &egui::Painter, origin: Pos2, window: &ViewWindow, width: f32) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // 7-day ticks share the layout denominator, so grid lines land exactly
    // on bar edges.
    for (frac, date) in layout::week_ticks(window) {
        let x = frac_x(origin, width, frac);

        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + 2000.0),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        painter.text(
            Pos2::new(x + 3.0, origin.y + 28.0),
            egui::Align2::LEFT_CENTER,
            date.format("%d %b").to_string(),
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );

        if date.day() <= 7 {
            painter.text(
                Pos2::new(x + 3.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    origin: Pos2,
    window: &ViewWindow,
    width: f32,
    height: f32,
) {
    let today = chrono::Local::now().date_naive();
    if today < window.start || today > window.end {
        return;
    }
    let offset = (today - window.start).num_days();
    let x = frac_x(origin, width, offset as f32 / window.total_days() as f32);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_item_bar(
    painter: &egui::Painter,
    origin: Pos2,
    window: &ViewWindow,
    chart_width: f32,
    item: &TimelineItem,
    y: f32,
    is_selected: bool,
) -> Rect {
    let placement = layout::place(item.range, window);
    let x_start = frac_x(origin, chart_width, placement.left);
    let bar_width = (placement.width * chart_width).max(6.0);
    let inset = theme::BAR_INSET;

    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, y + inset),
        Vec2::new(bar_width, ROW_HEIGHT - inset * 2.0),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, item.color);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_width, (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    // Epics get an outline so derived schedules read differently from
    // stored ones.
    if item.kind == ItemKind::Epic {
        painter.rect_stroke(
            bar_rect.shrink(0.5),
            rounding,
            Stroke::new(1.0, Color32::from_white_alpha(70)),
        );
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Item name on bar (single line, clipped to bar bounds)
    if bar_width > 30.0 {
        let galley = painter.layout_no_wrap(item.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = y + inset + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}
