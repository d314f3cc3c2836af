use client_core::Notice;
use eframe::egui;
use shared::domain::{CategoryFields, DraftField};

const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(46, 98, 62);
const SUCCESS_STROKE: egui::Color32 = egui::Color32::from_rgb(92, 160, 110);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

pub fn notice_banner(ui: &mut egui::Ui, notice: &Notice) {
    let (fill, stroke) = if notice.is_error() {
        (ERROR_FILL, ERROR_STROKE)
    } else {
        (SUCCESS_FILL, SUCCESS_STROKE)
    };

    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(notice.message()).color(egui::Color32::WHITE));
        });
}

/// Renders the name/image inputs and returns the edits made this frame.
pub fn category_fields(
    ui: &mut egui::Ui,
    id_salt: &str,
    fields: &CategoryFields,
) -> Vec<(DraftField, String)> {
    let mut edits = Vec::new();

    egui::Grid::new(("category_fields", id_salt))
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            for field in DraftField::ALL {
                ui.label(format!("{}:", field.label()));
                let mut buf = fields.get(field).to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut buf)
                        .id_salt((id_salt, field.as_str()))
                        .hint_text("required")
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    edits.push((field, buf));
                }
                ui.end_row();
            }
        });

    edits
}
