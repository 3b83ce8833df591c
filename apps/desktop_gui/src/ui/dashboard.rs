use client_core::render::DashboardView;
use eframe::egui;
use shared::domain::PriceTrend;

use crate::controller::view::UiAction;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(241, 196, 15);
const MARKET_UP: egui::Color32 = egui::Color32::from_rgb(46, 204, 113);
const MARKET_DOWN: egui::Color32 = egui::Color32::from_rgb(231, 76, 60);

fn card(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add(ui);
        });
    ui.add_space(10.0);
}

fn metric(ui: &mut egui::Ui, value: &str, label: &str) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(value).strong().size(20.0));
        ui.weak(label);
    });
}

fn headline(ui: &mut egui::Ui, view: &DashboardView) {
    let headline = &view.headline;
    card(ui, |ui| {
        ui.weak("Top Recommendation / சிறந்த பரிந்துரை");
        ui.label(
            egui::RichText::new(format!("🌱 {}", headline.best_crop))
                .size(28.0)
                .strong(),
        );
        if !headline.best_crop_local.is_empty() {
            ui.colored_label(ACCENT, &headline.best_crop_local);
        }
        ui.label(&headline.analysis);
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            metric(ui, &headline.temperature, "Avg Temp / வெப்பநிலை");
            ui.add_space(24.0);
            metric(ui, &headline.rainfall, "Rainfall / மழை");
            ui.add_space(24.0);
            metric(ui, headline.price.as_deref().unwrap_or("—"), "Est. Price / விலை");
        });
    });
}

fn fertilizer_plan(ui: &mut egui::Ui, view: &DashboardView) {
    card(ui, |ui| {
        ui.heading("🧪 Fertilizer Plan / உர அட்டவணை");
        egui::Grid::new("fertilizer_plan")
            .striped(true)
            .num_columns(3)
            .show(ui, |ui| {
                ui.strong("Fertilizer / உரம்");
                ui.strong("Quantity / அளவு");
                ui.strong("Reason / காரணம்");
                ui.end_row();
                for row in &view.fertilizer_rows {
                    ui.label(&row.fertilizer);
                    ui.label(&row.quantity);
                    ui.label(&row.reason);
                    ui.end_row();
                }
            });

        ui.add_space(10.0);
        ui.strong("📅 Application Schedule / இடும் முறை");
        for step in &view.schedule {
            ui.label(format!("• {step}"));
        }
    });
}

fn candidates(ui: &mut egui::Ui, view: &DashboardView) {
    card(ui, |ui| {
        ui.heading("📊 Top Candidates / மற்ற பயிர்கள்");
        egui::Grid::new("top_candidates")
            .striped(true)
            .num_columns(3)
            .show(ui, |ui| {
                ui.strong("Crop / பயிர்");
                ui.strong("Score / மதிப்பெண்");
                ui.strong("Trend / போக்கு");
                ui.end_row();
                for row in &view.candidates {
                    ui.vertical(|ui| {
                        ui.label(&row.crop);
                        if !row.crop_local.is_empty() {
                            ui.weak(&row.crop_local);
                        }
                    });
                    ui.label(&row.score);
                    let color = match row.trend {
                        PriceTrend::Up => MARKET_UP,
                        PriceTrend::Down => MARKET_DOWN,
                    };
                    ui.colored_label(color, row.trend_label);
                    ui.end_row();
                }
            });
    });
}

fn advisory(ui: &mut egui::Ui, view: &DashboardView) {
    card(ui, |ui| {
        ui.heading("⚠️ Advisory Note / குறிப்பு");
        ui.label(format!(
            "Recommendations are based on soil health and current market trends in {}. \
             Please ensure soil moisture is adequate before fertilizer application.",
            view.advisory.district
        ));
        ui.weak(
            "இப்பரிந்துரைகள் மண் வளம் மற்றும் சந்தை நிலவரத்தை அடிப்படையாகக் கொண்டவை. \
             உரமிடுவதற்கு முன் மண் ஈரம் இருப்பதை உறுதி செய்யவும்.",
        );
    });

    card(ui, |ui| {
        ui.heading("Soil Status / மண் நிலை");
        ui.columns(3, |columns| {
            metric(&mut columns[0], &view.advisory.soil_n, "N (தழை)");
            metric(&mut columns[1], &view.advisory.soil_p, "P (மணி)");
            metric(&mut columns[2], &view.advisory.soil_k, "K (சாம்பல்)");
        });
    });
}

/// Draws the dashboard; the only action it can produce is a new search.
pub fn show(ui: &mut egui::Ui, view: &DashboardView) -> Option<UiAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading("AgriAdvisor TN | விவசாய ஆலோசகர்");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("← New Search / புதிய தேடல்").clicked() {
                action = Some(UiAction::NewSearch);
            }
        });
    });
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.columns(2, |columns| {
            headline(&mut columns[0], view);
            fertilizer_plan(&mut columns[0], view);
            candidates(&mut columns[1], view);
            advisory(&mut columns[1], view);
        });
    });

    action
}
