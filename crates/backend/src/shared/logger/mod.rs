pub mod repository;

/// Записать событие в журнал `system_log` (асинхронно, без ожидания)
///
/// ```ignore
/// logger::log("product", "Product DRL-18V saved");
/// ```
pub fn log(category: &str, message: &str) {
    repository::log_event_background("server", category, message);
}
