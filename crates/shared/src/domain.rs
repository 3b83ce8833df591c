use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::reference::DISTRICTS;

/// One of the fixed district names; only constructible from [`DISTRICTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct District(&'static str);

impl District {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        DISTRICTS
            .into_iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(name))
            .map(Self)
    }

    pub fn all() -> impl Iterator<Item = District> {
        DISTRICTS.into_iter().map(Self)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

impl Default for District {
    fn default() -> Self {
        Self(DISTRICTS[0])
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for District {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for District {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        District::from_name(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown district '{raw}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SoilType {
    #[default]
    Loamy,
    Sandy,
    Clayey,
    Red,
    Black,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::Loamy,
        SoilType::Sandy,
        SoilType::Clayey,
        SoilType::Red,
        SoilType::Black,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoilType::Loamy => "Loamy",
            SoilType::Sandy => "Sandy",
            SoilType::Clayey => "Clayey",
            SoilType::Red => "Red",
            SoilType::Black => "Black",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoilType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|soil| soil.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown soil type '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Up,
    Down,
}

impl PriceTrend {
    pub fn label(self) -> &'static str {
        match self {
            PriceTrend::Up => "UP",
            PriceTrend::Down => "DOWN",
        }
    }
}
