use egui::{Color32, Context, Stroke};

use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
use crate::core::interaction::gesture::SelectionRect;
use crate::core::view::viewport::ViewportState;
use crate::input::gui::app::ports::presenter::PresenterStatus;

const MAX_SLIDER_ITERATIONS: u32 = 10_000;

/// Read-only values shown in the control panel.
pub struct PanelReadout<'a> {
    pub view: ViewportState,
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
    pub animating: bool,
    pub submitted_generation: u64,
    pub status: &'a PresenterStatus,
}

/// What the user changed this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PanelActions {
    pub iterations: Option<u32>,
    pub colour_map: Option<ColourMapKind>,
    pub reset_view: bool,
}

pub fn show_panel(
    ctx: &Context,
    iterations: u32,
    colour_map: ColourMapKind,
    readout: &PanelReadout<'_>,
) -> PanelActions {
    let mut actions = PanelActions::default();
    let mut iterations_value = iterations;
    let mut colour_map_value = colour_map;

    egui::Window::new("Explorer")
        .default_pos([10.0, 10.0])
        .default_size([260.0, 240.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Max iterations:");
                ui.add(egui::Slider::new(&mut iterations_value, 1..=MAX_SLIDER_ITERATIONS).logarithmic(true));
            });

            ui.horizontal(|ui| {
                ui.label("Colour map:");
                egui::ComboBox::from_id_source("mandelbrot_colour_map")
                    .selected_text(colour_map_value.display_name())
                    .show_ui(ui, |ui| {
                        for &kind in ColourMapKind::ALL {
                            ui.selectable_value(&mut colour_map_value, kind, kind.display_name());
                        }
                    });
            });

            if ui.button("Reset view").clicked() {
                actions.reset_view = true;
            }

            ui.separator();
            ui.label(format!("Centre: {:.12} {:+.12}i", readout.view.cx, readout.view.cy));
            ui.label(format!("Scale: {:.3e} per pixel", readout.view.scale));
            ui.label(format!("Zoom: {:.3e}x", readout.zoom));
            ui.label(format!("Canvas: {}x{}", readout.width, readout.height));
            if readout.animating {
                ui.label("Animating");
            }

            ui.separator();
            ui.label(format!(
                "Generation: {} shown / {} requested",
                readout.status.presented_generation, readout.submitted_generation
            ));
            if let Some(duration) = readout.status.render_duration {
                ui.label(format!("Last render: {} ms", duration.as_millis()));
            }
            if let Some(evaluator) = readout.status.evaluator {
                ui.label(format!("Evaluator: {evaluator}"));
            }
            if let Some(message) = &readout.status.error {
                ui.colored_label(Color32::LIGHT_RED, message);
            }
        });

    if iterations_value != iterations {
        actions.iterations = Some(iterations_value);
    }
    if colour_map_value != colour_map {
        actions.colour_map = Some(colour_map_value);
    }

    actions
}

/// Outlines the rectangle being dragged. `selection` is in device pixels.
pub fn paint_selection(ctx: &Context, selection: Option<SelectionRect>) {
    let Some(selection) = selection else {
        return;
    };

    let pixels_per_point = ctx.pixels_per_point();
    let to_points = |x: f64, y: f64| {
        egui::pos2(x as f32 / pixels_per_point, y as f32 / pixels_per_point)
    };
    let rect = egui::Rect::from_two_pos(
        to_points(selection.anchor.x, selection.anchor.y),
        to_points(selection.current.x, selection.current.y),
    );

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("selection_overlay"),
    ));
    painter.rect_filled(rect, 0.0, Color32::from_rgba_unmultiplied(255, 255, 255, 32));
    painter.rect_stroke(rect, 0.0, Stroke::new(1.5, Color32::WHITE));
}
