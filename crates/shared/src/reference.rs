//! Static reference tables consumed by the client: the district list offered
//! by the entry form and the crop display-name table used by the dashboard.

use std::collections::HashMap;

/// Tamil Nadu districts in the order the entry form lists them.
pub const DISTRICTS: [&str; 37] = [
    "Ariyalur",
    "Chengalpattu",
    "Chennai",
    "Coimbatore",
    "Cuddalore",
    "Dharmapuri",
    "Dindigul",
    "Erode",
    "Kallakurichi",
    "Kancheepuram",
    "Karur",
    "Krishnagiri",
    "Madurai",
    "Mayiladuthurai",
    "Nagapattinam",
    "Namakkal",
    "Nilgiris",
    "Perambalur",
    "Pudukkottai",
    "Ramanathapuram",
    "Ranipet",
    "Salem",
    "Sivaganga",
    "Tenkasi",
    "Thanjavur",
    "Theni",
    "Thoothukudi",
    "Tiruchirappalli",
    "Tirunelveli",
    "Tirupattur",
    "Tiruppur",
    "Tiruvallur",
    "Tiruvannamalai",
    "Tiruvarur",
    "Vellore",
    "Viluppuram",
    "Virudhunagar",
];

const TAMIL_CROP_NAMES: [(&str, &str); 25] = [
    ("Rice", "நெல் (Nel)"),
    ("Maize", "மக்காச்சோளம்"),
    ("Cotton", "பருத்தி"),
    ("Sugarcane", "கரும்பு"),
    ("Groundnut", "நிலக்கடலை"),
    ("Blackgram", "உளுந்து"),
    ("Coconut", "தென்னை"),
    ("Banana", "வாழை"),
    ("Turmeric", "மஞ்சள்"),
    ("Tapioca", "மரவள்ளி"),
    ("Chickpea", "கொண்டைக்கடலை"),
    ("Kidneybeans", "காராமணி"),
    ("Pigeonpeas", "துவரை"),
    ("Mothbeans", "நரிப்பயறு"),
    ("Mungbean", "பாசிப்பயறு"),
    ("Mango", "மாம்பழம்"),
    ("Grapes", "திராட்சை"),
    ("Watermelon", "தர்பூசணி"),
    ("Muskmelon", "முலாம்பழம்"),
    ("Apple", "ஆப்பிள்"),
    ("Orange", "ஆரஞ்சு"),
    ("Papaya", "பப்பாளி"),
    ("Coffee", "காபி"),
    ("Jute", "சணல்"),
    ("Lentil", "மைசூர் பருப்பு"),
];

/// Read-only lookup from a crop name to its local display string.
#[derive(Debug, Clone, Default)]
pub struct CropNames {
    names: HashMap<String, String>,
}

impl CropNames {
    /// An empty table; every lookup renders as an empty string.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tamil() -> Self {
        Self::from_pairs(TAMIL_CROP_NAMES)
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(crop, display)| (crop.into(), display.into()))
                .collect(),
        }
    }

    /// Missing crops yield `""`, never an error.
    pub fn display(&self, crop: &str) -> &str {
        self.names.get(crop).map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
