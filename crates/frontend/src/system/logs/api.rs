use crate::shared::api_utils::{api_url, get_json};
use contracts::shared::logger::LogEntry;
use gloo_net::http::Request;

const LOGS_PATH: &str = "/api/logs";

/// Fetch all system log entries
pub async fn fetch_logs() -> Result<Vec<LogEntry>, String> {
    get_json::<Vec<LogEntry>>(LOGS_PATH).await
}

/// Clear the system log, returns the number of removed entries
pub async fn clear_logs() -> Result<u64, String> {
    let response = Request::delete(&api_url(LOGS_PATH))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to clear log: {}", response.status()));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;
    Ok(body.get("removed").and_then(|v| v.as_u64()).unwrap_or(0))
}
