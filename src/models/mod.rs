use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical label used for both sheets and individual voters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourRound {
    Saffron,
    Black,
    Red,
    Yellow,
    Blue,
    White,
    Darkpink,
}

impl ColourRound {
    pub const ALL: [ColourRound; 7] = [
        ColourRound::Saffron,
        ColourRound::Black,
        ColourRound::Red,
        ColourRound::Yellow,
        ColourRound::Blue,
        ColourRound::White,
        ColourRound::Darkpink,
    ];

    /// Wire value, also used in CSV rows
    pub fn value(&self) -> &'static str {
        match self {
            ColourRound::Saffron => "saffron",
            ColourRound::Black => "black",
            ColourRound::Red => "red",
            ColourRound::Yellow => "yellow",
            ColourRound::Blue => "blue",
            ColourRound::White => "white",
            ColourRound::Darkpink => "darkpink",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            ColourRound::Saffron => "Saffron",
            ColourRound::Black => "Black",
            ColourRound::Red => "Red",
            ColourRound::Yellow => "Yellow",
            ColourRound::Blue => "Blue",
            ColourRound::White => "White",
            ColourRound::Darkpink => "Dark Pink",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.value() == value)
    }
}

impl std::fmt::Display for ColourRound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// GPS coordinate pair in floating-point degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Per-person sub-record nested inside a sheet; no identity of its own
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    pub name: String,
    pub age: String,
    pub colour_round: Option<ColourRound>,
}

/// Household survey record with categorical attributes and embedded voters
///
/// `no_of_voters` keeps the raw count field as entered; everything that needs
/// a number parses it with a 0 default. `voters.len()` tracks the parsed
/// count whenever the field changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub id: String,
    pub house_name: String,
    pub colour_round: ColourRound,
    pub community: String,
    pub no_of_voters: String,
    pub location: Option<Coordinate>,
    pub voters: Vec<Voter>,
    pub created_at: DateTime<Utc>,
}

impl Sheet {
    /// Voter count parsed from the raw field, 0 on parse failure
    pub fn voter_count(&self) -> u32 {
        self.no_of_voters.trim().parse().unwrap_or(0)
    }
}

/// Create/update payload for a sheet; id and created_at are store-generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetInput {
    pub house_name: String,
    pub colour_round: ColourRound,
    pub community: String,
    pub no_of_voters: String,
    pub location: Option<Coordinate>,
    pub voters: Vec<Voter>,
}

/// Standalone GPS-tagged marker, independent of any sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub location: Coordinate,
    pub created_at: DateTime<Utc>,
}

/// Create payload for a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointInput {
    pub location: Coordinate,
}

/// Decoded session token payload: `{id, username, exp}`
///
/// `exp` is unix milliseconds; the session is valid while `now < exp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub username: String,
    pub exp: i64,
}

impl Session {
    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        now_millis < self.exp
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub token_path: String,
    pub export_dir: String,
    pub map_center: Coordinate,
    pub geolocation_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            token_path: std::env::var("AUTH_TOKEN_PATH")
                .unwrap_or_else(|_| "auth_token".to_string()),
            export_dir: std::env::var("EXPORT_DIR").unwrap_or_else(|_| ".".to_string()),
            map_center: Coordinate::new(
                std::env::var("MAP_CENTER_LAT")
                    .unwrap_or_else(|_| "28.6139".to_string())
                    .parse()
                    .unwrap_or(28.6139),
                std::env::var("MAP_CENTER_LNG")
                    .unwrap_or_else(|_| "77.2090".to_string())
                    .parse()
                    .unwrap_or(77.2090),
            ),
            geolocation_enabled: std::env::var("GEOLOCATION_ENABLED")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        })
    }
}
