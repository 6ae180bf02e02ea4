use crate::planner::CurrentScore;
use crate::types::report::RunReport;
use serde_json::json;

pub fn to_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn current_to_json(city: &str, current: &CurrentScore) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "city": city,
        "observation": current.observation,
        "score": current.breakdown,
    }))
}
