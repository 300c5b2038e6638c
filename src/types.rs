use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A ranked team as returned inside the `teams` array of a character
/// response. Only `bracket` is guaranteed; everything else is whatever the
/// API happened to send.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub bracket: i64,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub division_rank: Option<i64>,
    #[serde(default)]
    pub ratio: Option<f64>,
    #[serde(default)]
    pub fav_race: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub wins: Option<i64>,
    #[serde(default)]
    pub world_rank: Option<i64>,
    #[serde(default)]
    pub losses: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_random: Option<bool>,
    #[serde(default)]
    pub region_rank: Option<i64>,
}

impl TeamRecord {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// One point of a date keyed map usage series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapUsageEntry {
    pub date: String,
    pub usage: Value,
}

/// Where decoding a JSON payload failed, mirroring `serde_json::error::Category`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonFailureKind {
    Io,
    Syntax,
    Data,
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFailure {
    pub kind: JsonFailureKind,
    pub line: usize,
    pub column: usize,
}

impl From<&serde_json::Error> for JsonFailure {
    fn from(err: &serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match err.classify() {
            Category::Io => JsonFailureKind::Io,
            Category::Syntax => JsonFailureKind::Syntax,
            Category::Data => JsonFailureKind::Data,
            Category::Eof => JsonFailureKind::Eof,
        };
        Self {
            kind,
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Outcome of the decode step of the most recent fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeStatus {
    Decoded,
    Failed(JsonFailure),
    /// The transport failed, nothing was decoded.
    NotAttempted,
}
