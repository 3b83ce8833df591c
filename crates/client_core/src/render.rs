//! Pure mapping from a resolved [`Recommendation`] to dashboard sections.
//!
//! Every sequence keeps the order the service sent; nothing is sorted,
//! filtered or deduplicated here.

use std::fmt::Write as _;

use shared::{
    domain::PriceTrend,
    protocol::{CropCandidate, FertilizerInput, Recommendation},
    reference::CropNames,
};

const CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub headline: Headline,
    pub fertilizer_rows: Vec<FertilizerRow>,
    pub schedule: Vec<String>,
    pub candidates: Vec<CandidateRow>,
    pub advisory: Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub best_crop: String,
    pub best_crop_local: String,
    pub analysis: String,
    pub temperature: String,
    pub rainfall: String,
    /// `None` only when the service sent no candidates.
    pub price: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FertilizerRow {
    pub fertilizer: String,
    pub quantity: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub crop: String,
    pub crop_local: String,
    pub score: String,
    pub trend: PriceTrend,
    pub trend_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub district: String,
    pub soil_n: String,
    pub soil_p: String,
    pub soil_k: String,
}

pub fn dashboard(result: &Recommendation, crop_names: &CropNames) -> DashboardView {
    DashboardView {
        headline: headline(result, crop_names),
        fertilizer_rows: result
            .fertilizer_plan
            .inputs
            .iter()
            .map(fertilizer_row)
            .collect(),
        schedule: result.fertilizer_plan.schedule.clone(),
        candidates: result
            .top_recommendations
            .iter()
            .map(|candidate| candidate_row(candidate, crop_names))
            .collect(),
        advisory: Advisory {
            district: result.inputs.district.clone(),
            soil_n: number(result.inputs.soil.n),
            soil_p: number(result.inputs.soil.p),
            soil_k: number(result.inputs.soil.k),
        },
    }
}

fn headline(result: &Recommendation, crop_names: &CropNames) -> Headline {
    Headline {
        best_crop: result.best_crop.clone(),
        best_crop_local: crop_names.display(&result.best_crop).to_string(),
        analysis: result.analysis.clone(),
        temperature: format!("{}°C", fixed(result.weather_context.temperature, 1)),
        rainfall: format!("{}mm", fixed(result.weather_context.rainfall, 0)),
        price: result
            .top_recommendations
            .first()
            .map(|top| format!("{CURRENCY_SYMBOL}{}", number(top.market_price))),
    }
}

fn fertilizer_row(input: &FertilizerInput) -> FertilizerRow {
    FertilizerRow {
        fertilizer: input.fertilizer.clone(),
        quantity: format!("{} {}", number(input.quantity), input.unit),
        reason: input.reason.clone(),
    }
}

fn candidate_row(candidate: &CropCandidate, crop_names: &CropNames) -> CandidateRow {
    CandidateRow {
        crop: candidate.crop.clone(),
        crop_local: crop_names.display(&candidate.crop).to_string(),
        score: number(candidate.final_score),
        trend: candidate.price_trend,
        trend_label: candidate.price_trend.label(),
    }
}

/// Shortest decimal form of the value: `2200`, `2200.5`, `77.84`.
fn number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Fixed-point with `decimals` places. Rounds on the exact binary value,
/// with exact ties going away from zero.
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = if is_exact_tie(value, decimals) {
        let scale = 10f64.powi(decimals as i32);
        format!("{:.*}", decimals, (value * scale).round() / scale)
    } else {
        format!("{value:.decimals$}")
    };
    // "-0.0" reads as noise on a dashboard.
    match formatted.strip_prefix('-') {
        Some(unsigned) if unsigned.chars().all(|c| c == '0' || c == '.') => unsigned.to_string(),
        _ => formatted,
    }
}

fn is_exact_tie(value: f64, decimals: usize) -> bool {
    // 1074 fractional digits cover every finite f64 exactly.
    let expanded = format!("{:.1074}", value.abs());
    let Some((_, fraction)) = expanded.split_once('.') else {
        return false;
    };
    let tail = &fraction[decimals..];
    tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0')
}

/// Plain-text layout of a dashboard, one section per block.
pub fn text(view: &DashboardView) -> String {
    let mut out = String::new();
    let headline = &view.headline;

    let _ = write!(out, "Top recommendation: {}", headline.best_crop);
    if !headline.best_crop_local.is_empty() {
        let _ = write!(out, " ({})", headline.best_crop_local);
    }
    out.push('\n');
    let _ = writeln!(out, "{}", headline.analysis);
    let _ = writeln!(
        out,
        "Avg temp: {}  Rainfall: {}  Est. price: {}",
        headline.temperature,
        headline.rainfall,
        headline.price.as_deref().unwrap_or("n/a")
    );

    out.push_str("\nFertilizer plan\n");
    for row in &view.fertilizer_rows {
        let _ = writeln!(out, "  {:<16} {:>16}  {}", row.fertilizer, row.quantity, row.reason);
    }

    out.push_str("\nApplication schedule\n");
    for (index, step) in view.schedule.iter().enumerate() {
        let _ = writeln!(out, "  {}. {step}", index + 1);
    }

    out.push_str("\nTop candidates\n");
    for row in &view.candidates {
        let _ = writeln!(out, "  {:<16} {:>8}  {}", row.crop, row.score, row.trend_label);
    }

    let advisory = &view.advisory;
    let _ = writeln!(
        out,
        "\nRecommendations are based on soil health and current market trends in {}.",
        advisory.district
    );
    let _ = writeln!(
        out,
        "Soil status: N {}  P {}  K {}",
        advisory.soil_n, advisory.soil_p, advisory.soil_k
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::protocol::{
        FertilizerPlan, SoilReading, SubmittedInputs, WeatherContext,
    };

    fn candidate(crop: &str, score: f64, trend: PriceTrend, price: f64) -> CropCandidate {
        CropCandidate {
            crop: crop.to_string(),
            final_score: score,
            price_trend: trend,
            market_price: price,
            confidence: None,
            market_score: None,
        }
    }

    fn sample() -> Recommendation {
        Recommendation {
            best_crop: "Rice".to_string(),
            analysis: "Rice suits the season.".to_string(),
            weather_context: WeatherContext {
                temperature: 28.46,
                rainfall: 812.3,
                humidity: None,
            },
            top_recommendations: vec![
                candidate("Rice", 0.91, PriceTrend::Up, 2200.0),
                candidate("Maize", 0.77, PriceTrend::Down, 1800.0),
            ],
            fertilizer_plan: FertilizerPlan {
                inputs: vec![
                    FertilizerInput {
                        fertilizer: "Urea".to_string(),
                        quantity: 65.22,
                        unit: "kg/acre".to_string(),
                        reason: "To supply Nitrogen".to_string(),
                    },
                    FertilizerInput {
                        fertilizer: "DAP".to_string(),
                        quantity: 39.13,
                        unit: "kg/acre".to_string(),
                        reason: "To supply Phosphorus".to_string(),
                    },
                ],
                schedule: vec![
                    "Basal: apply DAP before sowing".to_string(),
                    "Day 30: top-dress Urea".to_string(),
                ],
            },
            inputs: SubmittedInputs {
                district: "Thanjavur".to_string(),
                soil: SoilReading {
                    n: 90.0,
                    p: 42.0,
                    k: 43.0,
                    ph: None,
                },
            },
        }
    }

    #[test]
    fn headline_metrics_round_temperature_and_rainfall() {
        let view = dashboard(&sample(), &CropNames::tamil());
        assert_eq!(view.headline.temperature, "28.5°C");
        assert_eq!(view.headline.rainfall, "812mm");
        assert_eq!(view.headline.price.as_deref(), Some("₹2200"));
        assert_eq!(view.headline.best_crop_local, "நெல் (Nel)");
    }

    #[test]
    fn candidates_keep_service_order_with_uppercase_trends() {
        let view = dashboard(&sample(), &CropNames::tamil());
        let rows: Vec<_> = view
            .candidates
            .iter()
            .map(|row| (row.crop.as_str(), row.score.as_str(), row.trend_label))
            .collect();
        assert_eq!(rows, vec![("Rice", "0.91", "UP"), ("Maize", "0.77", "DOWN")]);
    }

    #[test]
    fn fertilizer_rows_and_schedule_are_not_reordered_or_deduplicated() {
        let mut result = sample();
        result
            .fertilizer_plan
            .schedule
            .push("Day 30: top-dress Urea".to_string());
        let view = dashboard(&result, &CropNames::empty());

        assert_eq!(view.fertilizer_rows[0].fertilizer, "Urea");
        assert_eq!(view.fertilizer_rows[0].quantity, "65.22 kg/acre");
        assert_eq!(view.fertilizer_rows[1].fertilizer, "DAP");
        assert_eq!(view.schedule, result.fertilizer_plan.schedule);
        assert_eq!(view.schedule.len(), 3);
    }

    #[test]
    fn empty_candidates_render_empty_table_without_price() {
        let mut result = sample();
        result.top_recommendations.clear();
        let view = dashboard(&result, &CropNames::tamil());
        assert!(view.candidates.is_empty());
        assert_eq!(view.headline.price, None);
        assert!(text(&view).contains("Est. price: n/a"));
    }

    #[test]
    fn price_keeps_source_precision() {
        let mut result = sample();
        result.top_recommendations[0].market_price = 2200.5;
        let view = dashboard(&result, &CropNames::empty());
        assert_eq!(view.headline.price.as_deref(), Some("₹2200.5"));
    }

    #[test]
    fn unknown_crop_has_empty_local_name() {
        let mut result = sample();
        result.top_recommendations[1].crop = "Quinoa".to_string();
        let view = dashboard(&result, &CropNames::tamil());
        assert_eq!(view.candidates[1].crop_local, "");
    }

    #[test]
    fn fixed_rounds_ties_away_from_zero() {
        assert_eq!(fixed(0.5, 0), "1");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(0.25, 1), "0.3");
        assert_eq!(fixed(1.005, 2), "1.00");
        assert_eq!(fixed(0.15, 1), "0.1");
        assert_eq!(fixed(-0.04, 1), "0.0");
        assert_eq!(fixed(30.0, 1), "30.0");
    }

    #[test]
    fn text_layout_lists_sections_in_order() {
        let rendered = text(&dashboard(&sample(), &CropNames::empty()));
        let rice = rendered.find("  Rice").expect("rice row");
        let maize = rendered.find("  Maize").expect("maize row");
        assert!(rice < maize);
        assert!(rendered.contains("market trends in Thanjavur."));
        assert!(rendered.contains("Soil status: N 90  P 42  K 43"));
    }
}
