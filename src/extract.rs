use serde_json::Value;

use crate::types::MapUsageEntry;

pub const DEFAULT_BRACKET: i64 = 1;

/// The bracket of a team record. The API is loose about number types, so
/// `1`, `1.0` and `"1"` all count as bracket 1.
fn team_bracket(team: &Value) -> Option<i64> {
    match team.get("bracket")? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Teams of a character response whose `bracket` equals `bracket`, in the
/// order the API returned them. `None` when the response has no `teams`.
pub fn bracket_records(response: &Value, bracket: i64) -> Option<Vec<Value>> {
    let teams = response.get("teams")?.as_array()?;
    Some(
        teams
            .iter()
            .filter(|team| team_bracket(team) == Some(bracket))
            .cloned()
            .collect(),
    )
}

/// The entry of a date keyed usage object with the greatest date. Keys are
/// `YYYY-MM-DD` style so lexical order is chronological order.
pub fn latest_map_usage(response: &Value) -> Option<MapUsageEntry> {
    let series = response.as_object()?;
    if series.contains_key("teams") {
        return None;
    }
    series
        .iter()
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(date, usage)| MapUsageEntry {
            date: date.clone(),
            usage: usage.clone(),
        })
}
