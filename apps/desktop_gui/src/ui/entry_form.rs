use client_core::FormField;
use eframe::egui;
use shared::domain::{District, SoilType};

use crate::controller::view::{EntryView, UiAction};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(231, 76, 60);

fn soil_label(soil: SoilType) -> &'static str {
    match soil {
        SoilType::Loamy => "Loamy (களிமண் கலந்த மணல்)",
        SoilType::Sandy => "Sandy (மணல் பாங்கான)",
        SoilType::Clayey => "Clayey (களிமண்)",
        SoilType::Red => "Red (செம்மண்)",
        SoilType::Black => "Black (கரிசல் மண்)",
    }
}

fn numeric_field(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    field: FormField,
    entry: &EntryView<'_>,
    actions: &mut Vec<UiAction>,
) {
    let enabled = !entry.busy;
    ui.vertical(|ui| {
        ui.label(label);
        let mut buf = entry.form.value(field).to_string();
        let response = ui.add_enabled(
            enabled,
            egui::TextEdit::singleline(&mut buf)
                .hint_text(hint)
                .desired_width(140.0),
        );
        if response.changed() {
            actions.push(UiAction::SetField(field, buf));
        }
    });
}

/// Draws the form and returns what the user did this frame.
pub fn show(ui: &mut egui::Ui, entry: &EntryView<'_>) -> Vec<UiAction> {
    let mut actions = Vec::new();
    let editable = !entry.busy;

    ui.vertical_centered(|ui| {
        ui.heading("🌾 AgriAdvisor TN");
        ui.label("விவசாய ஆலோசகர்");
        ui.weak("AI-Powered Crop & Fertilizer Recommendations");
    });
    ui.add_space(12.0);

    if let Some(status) = entry.backend_status {
        ui.colored_label(ERROR_COLOR, status);
        ui.add_space(6.0);
    }

    ui.label("District (Tamil Nadu) / மாவட்டம்");
    ui.add_enabled_ui(editable, |ui| {
        egui::ComboBox::from_id_salt("district")
            .selected_text(entry.form.district.name())
            .width(300.0)
            .show_ui(ui, |ui| {
                for district in District::all() {
                    let selected = district == entry.form.district;
                    if ui.selectable_label(selected, district.name()).clicked() && !selected {
                        actions.push(UiAction::SetField(
                            FormField::District,
                            district.name().to_string(),
                        ));
                    }
                }
            });
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        for (label, hint, field) in [
            ("Nitrogen (N) / தழைச்சத்து", "e.g. 90", FormField::N),
            ("Phosphorus (P) / மணிச்சத்து", "e.g. 42", FormField::P),
            ("Potassium (K) / சாம்பல் சத்து", "e.g. 43", FormField::K),
        ] {
            numeric_field(ui, label, hint, field, entry, &mut actions);
        }
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        numeric_field(ui, "Soil pH / மண் pH", "6.5", FormField::Ph, entry, &mut actions);
        ui.vertical(|ui| {
            ui.label("Soil Type / மண் வகை");
            ui.add_enabled_ui(editable, |ui| {
                egui::ComboBox::from_id_salt("soil_type")
                    .selected_text(soil_label(entry.form.soil_type))
                    .width(240.0)
                    .show_ui(ui, |ui| {
                        for soil in SoilType::ALL {
                            let selected = soil == entry.form.soil_type;
                            let clicked = ui.selectable_label(selected, soil_label(soil)).clicked();
                            if clicked && !selected {
                                actions.push(UiAction::SetField(
                                    FormField::SoilType,
                                    soil.as_str().to_string(),
                                ));
                            }
                        }
                    });
            });
        });
    });
    ui.add_space(14.0);

    ui.vertical_centered(|ui| {
        let label = if entry.busy {
            "Analyzing..."
        } else {
            "Get Recommendation / பரிந்துரை பெற"
        };
        ui.horizontal(|ui| {
            let button = egui::Button::new(label).min_size(egui::vec2(260.0, 32.0));
            if ui.add_enabled(!entry.busy, button).clicked() {
                actions.push(UiAction::Submit);
            }
            if entry.busy {
                ui.spinner();
            }
        });

        if let Some(invalid) = entry.validation {
            ui.colored_label(ERROR_COLOR, invalid.to_string());
        }
        if let Some(error) = &entry.error {
            ui.colored_label(ERROR_COLOR, error);
        }
    });

    ui.add_space(18.0);
    ui.vertical_centered(|ui| {
        ui.weak("Designed for Tamil Nadu Agriculture • Market Aware • Scientific Data");
    });

    actions
}
