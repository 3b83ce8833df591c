use serde::{Deserialize, Serialize};

use crate::domain::{District, PriceTrend, SoilType};

/// Body of the single outbound `POST`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub district: District,
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ph: f64,
    pub soil_type: SoilType,
}

/// Full advisory returned by the recommendation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub best_crop: String,
    pub analysis: String,
    pub weather_context: WeatherContext,
    pub top_recommendations: Vec<CropCandidate>,
    pub fertilizer_plan: FertilizerPlan,
    pub inputs: SubmittedInputs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    pub temperature: f64,
    pub rainfall: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropCandidate {
    pub crop: String,
    pub final_score: f64,
    pub price_trend: PriceTrend,
    pub market_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerPlan {
    pub inputs: Vec<FertilizerInput>,
    pub schedule: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerInput {
    pub fertilizer: String,
    pub quantity: f64,
    pub unit: String,
    pub reason: String,
}

/// Echo of what the service scored, as it understood the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedInputs {
    pub district: String,
    pub soil: SoilReading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    #[serde(rename = "pH", default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
}
