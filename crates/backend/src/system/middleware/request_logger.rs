use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;
use std::time::Duration;

use crate::shared::format::format_number;

/// ANSI-цвет времени по классу статуса
fn status_color(status: u16) -> &'static str {
    match status {
        200..=299 => "36",
        300..=499 => "33",
        _ => "31",
    }
}

/// `12:30:01 |    12ms |        1.024 | 200    GET /api/product`
fn format_line(status: u16, duration: Duration, size: Option<usize>, method: &str, path: &str) -> String {
    let size = size.map(format_number).unwrap_or_else(|| "error".to_string());
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(status),
        Local::now().format("%H:%M:%S"),
        duration.as_millis(),
        size,
        status,
        method,
        path
    )
}

/// Middleware для логирования HTTP запросов
///
/// Выводит в консоль время, длительность, размер ответа, статус, метод и путь.
/// Ответы 5xx дополнительно попадают в tracing.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            println!(
                "{}",
                format_line(status, start.elapsed(), None, method.as_str(), uri.path())
            );
            tracing::warn!("{} {}: cannot read response body: {}", method, uri.path(), e);
            return Response::from_parts(parts, Body::default());
        }
    };

    println!(
        "{}",
        format_line(
            status,
            start.elapsed(),
            Some(bytes.len()),
            method.as_str(),
            uri.path()
        )
    );
    if status >= 500 {
        tracing::warn!("{} {} -> {}", method, uri.path(), status);
    }

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color() {
        assert_eq!(status_color(200), "36");
        assert_eq!(status_color(404), "33");
        assert_eq!(status_color(500), "31");
    }

    #[test]
    fn test_format_line() {
        let line = format_line(200, Duration::from_millis(12), Some(1024), "GET", "/api/product");
        assert!(line.contains("12ms"));
        assert!(line.contains("1.024"));
        assert!(line.ends_with("200    GET /api/product"));

        let failed = format_line(500, Duration::from_millis(1), None, "POST", "/api/x");
        assert!(failed.contains("error"));
    }
}
