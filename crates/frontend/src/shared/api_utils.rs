//! API utilities for frontend-backend communication
//!
//! Base URL plus generic CRUD helpers over `/api/<collection>`.
//! Ошибки сервера приходят как `{"error": "..."}` и пробрасываются строкой.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Get the base URL for API requests
///
/// The backend always listens on port 3000 of the host that served the page.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Текст ошибки из тела ответа: `{"error": ...}` или сырой текст, иначе HTTP-статус
pub fn error_text(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}

async fn ensure_ok(resp: Response) -> Result<Response, String> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(error_text(status, &body))
}

/// GET с разбором JSON
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let resp = Request::get(&api_url(path))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    ensure_ok(resp)
        .await?
        .json::<T>()
        .await
        .map_err(|e| e.to_string())
}

/// POST JSON, ответ - JSON
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let resp = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    ensure_ok(resp)
        .await?
        .json::<T>()
        .await
        .map_err(|e| e.to_string())
}

/// DELETE без тела ответа
pub async fn delete_path(path: &str) -> Result<(), String> {
    let resp = Request::delete(&api_url(path))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    ensure_ok(resp).await.map(|_| ())
}

/// `GET /api/<collection>`
pub async fn fetch_list<T: DeserializeOwned>(collection: &str) -> Result<Vec<T>, String> {
    get_json(&format!("/api/{}", collection)).await
}

/// `GET /api/<collection>/<id>`
pub async fn fetch_by_id<T: DeserializeOwned>(collection: &str, id: &str) -> Result<T, String> {
    get_json(&format!("/api/{}/{}", collection, id)).await
}

/// `POST /api/<collection>` - создание или обновление, возвращает id записи
pub async fn upsert<B: Serialize>(collection: &str, dto: &B) -> Result<String, String> {
    let value: serde_json::Value = post_json(&format!("/api/{}", collection), dto).await?;
    id_from_response(&value).ok_or_else(|| "Server response has no id".to_string())
}

/// `DELETE /api/<collection>/<id>`
pub async fn delete_by_id(collection: &str, id: &str) -> Result<(), String> {
    delete_path(&format!("/api/{}/{}", collection, id)).await
}

/// Удаление пачки; возвращает количество ошибок и первую из них
pub async fn delete_many(collection: &str, ids: Vec<String>) -> Result<(), String> {
    let mut failed = 0usize;
    let mut first_error = None;
    for id in ids {
        if let Err(e) = delete_by_id(collection, &id).await {
            failed += 1;
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        None => Ok(()),
        Some(e) => Err(format!("{} item(s) were not deleted: {}", failed, e)),
    }
}

fn id_from_response(value: &serde_json::Value) -> Option<String> {
    value.get("id").and_then(|v| v.as_str()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_prefers_error_field() {
        assert_eq!(
            error_text(400, r#"{"error":"SKU already exists"}"#),
            "SKU already exists"
        );
        assert_eq!(error_text(500, ""), "HTTP 500");
        assert_eq!(error_text(502, "Bad gateway"), "HTTP 502: Bad gateway");
    }

    #[test]
    fn test_id_from_response() {
        let v = serde_json::json!({ "id": "abc" });
        assert_eq!(id_from_response(&v), Some("abc".to_string()));
        assert_eq!(id_from_response(&serde_json::json!({})), None);
    }
}
