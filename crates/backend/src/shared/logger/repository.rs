use chrono::Utc;
use contracts::shared::logger::LogEntry;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "system_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: String,
    pub source: String,
    pub category: String,
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogEntry {
    fn from(m: Model) -> Self {
        LogEntry {
            id: m.id,
            timestamp: m.timestamp,
            source: m.source,
            category: m.category,
            message: m.message,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Запись в фоне: ошибка журнала не должна ронять запрос
pub fn log_event_background(source: &str, category: &str, message: &str) {
    let source = source.to_string();
    let category = category.to_string();
    let message = message.to_string();

    tokio::spawn(async move {
        if let Err(e) = log_event(conn(), &source, &category, &message).await {
            tracing::warn!("Failed to write system_log: {}", e);
        }
    });
}

pub async fn log_event<C: ConnectionTrait>(
    db: &C,
    source: &str,
    category: &str,
    message: &str,
) -> anyhow::Result<()> {
    let now = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();

    let active = ActiveModel {
        id: NotSet,
        timestamp: Set(now),
        source: Set(source.to_string()),
        category: Set(category.to_string()),
        message: Set(message.to_string()),
    };
    active.insert(db).await?;
    Ok(())
}

/// Последние записи журнала, новые сверху
pub async fn list_recent<C: ConnectionTrait>(db: &C, limit: u64) -> anyhow::Result<Vec<LogEntry>> {
    let logs = Entity::find()
        .order_by_desc(Column::Id)
        .limit(limit)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(logs)
}

pub async fn get_all_logs() -> anyhow::Result<Vec<LogEntry>> {
    list_recent(conn(), 1000).await
}

pub async fn clear_all_logs() -> anyhow::Result<u64> {
    let result = Entity::delete_many().exec(conn()).await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;

    #[tokio::test]
    async fn test_log_and_list_newest_first() {
        let db = test_connection().await;
        log_event(&db, "server", "startup", "first").await.unwrap();
        log_event(&db, "server", "product", "second").await.unwrap();
        log_event(&db, "server", "product", "third").await.unwrap();

        let logs = list_recent(&db, 2).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "third");
        assert_eq!(logs[1].category, "product");
    }
}
