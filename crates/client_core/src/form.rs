//! Entry-form state: the values the user has typed so far, and the
//! submission-time checks that turn them into a wire request.

use std::{fmt, str::FromStr};

use shared::{
    domain::{District, SoilType},
    protocol::RecommendationRequest,
};
use thiserror::Error;

pub const DEFAULT_PH: &str = "6.5";
const DEFAULT_PH_VALUE: f64 = 6.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    District,
    N,
    P,
    K,
    Ph,
    SoilType,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::District,
        FormField::N,
        FormField::P,
        FormField::K,
        FormField::Ph,
        FormField::SoilType,
    ];

    /// Key used in the request body.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::District => "district",
            FormField::N => "n",
            FormField::P => "p",
            FormField::K => "k",
            FormField::Ph => "ph",
            FormField::SoilType => "soil_type",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::District => "district",
            FormField::N => "N",
            FormField::P => "P",
            FormField::K => "K",
            FormField::Ph => "pH",
            FormField::SoilType => "soil type",
        };
        f.write_str(label)
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("unknown district '{0}'")]
    UnknownDistrict(String),
    #[error("unknown soil type '{0}'")]
    UnknownSoilType(String),
    #[error("{field} is required")]
    Missing { field: FormField },
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: FormField, value: String },
    #[error("{field} must not be negative")]
    Negative { field: FormField },
}

/// Current user input. Numeric fields keep the text as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub district: District,
    pub n: String,
    pub p: String,
    pub k: String,
    pub ph: String,
    pub soil_type: SoilType,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            district: District::default(),
            n: String::new(),
            p: String::new(),
            k: String::new(),
            ph: DEFAULT_PH.to_string(),
            soil_type: SoilType::default(),
        }
    }
}

impl FormData {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::District => self.district.name(),
            FormField::N => &self.n,
            FormField::P => &self.p,
            FormField::K => &self.k,
            FormField::Ph => &self.ph,
            FormField::SoilType => self.soil_type.as_str(),
        }
    }

    /// Applies the form's `required` rules and builds the request body.
    /// A blank pH falls back to the default; pH is not range-checked.
    pub fn to_request(&self) -> Result<RecommendationRequest, FormError> {
        let n = required_amount(FormField::N, &self.n)?;
        let p = required_amount(FormField::P, &self.p)?;
        let k = required_amount(FormField::K, &self.k)?;
        let ph = parse_number(FormField::Ph, &self.ph)?.unwrap_or(DEFAULT_PH_VALUE);

        Ok(RecommendationRequest {
            district: self.district,
            n,
            p,
            k,
            ph,
            soil_type: self.soil_type,
        })
    }
}

fn parse_number(field: FormField, raw: &str) -> Result<Option<f64>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(FormError::NotANumber {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Characters a number input lets through while typing.
fn is_number_input(raw: &str) -> bool {
    raw.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

fn required_amount(field: FormField, raw: &str) -> Result<f64, FormError> {
    let value = parse_number(field, raw)?.ok_or(FormError::Missing { field })?;
    if value < 0.0 {
        return Err(FormError::Negative { field });
    }
    Ok(value)
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    data: FormData,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Replaces exactly one field. A value the widget could not have produced
    /// is rejected and the form is left untouched. Numeric fields accept
    /// partial entries such as "-" or "."; `to_request` judges them at submit.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        match field {
            FormField::District => {
                self.data.district = District::from_name(value)
                    .ok_or_else(|| FormError::UnknownDistrict(value.to_string()))?;
            }
            FormField::SoilType => {
                self.data.soil_type = value
                    .parse()
                    .map_err(|_| FormError::UnknownSoilType(value.to_string()))?;
            }
            FormField::N | FormField::P | FormField::K | FormField::Ph => {
                let value = value.trim();
                if !is_number_input(value) {
                    return Err(FormError::NotANumber {
                        field,
                        value: value.to_string(),
                    });
                }
                let slot = match field {
                    FormField::N => &mut self.data.n,
                    FormField::P => &mut self.data.p,
                    FormField::K => &mut self.data.k,
                    _ => &mut self.data.ph,
                };
                *slot = value.to_string();
            }
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.data = FormData::default();
    }
}
