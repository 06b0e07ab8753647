//! Сверка связующих таблиц (parent_id, child_id)
//!
//! При сохранении родителя все его строки удаляются и вставляется текущий
//! набор из памяти. Без диффа: набор маленький, а порядок и дубли в UI
//! не важны. Вызывающий код выполняет это в той же транзакции, что и
//! запись самого агрегата.

use sea_orm::{ConnectionTrait, DatabaseBackend, Statement, Value};
use std::collections::HashMap;

/// Описание связующей таблицы
#[derive(Debug, Clone, Copy)]
pub struct JunctionTable {
    pub table: &'static str,
    pub parent_column: &'static str,
    pub child_column: &'static str,
}

fn stmt(sql: String, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values)
}

/// Удалить все связи родителя
pub async fn delete_links<C: ConnectionTrait>(
    db: &C,
    junction: &JunctionTable,
    parent_id: &str,
) -> anyhow::Result<u64> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        junction.table, junction.parent_column
    );
    let result = db.execute(stmt(sql, vec![parent_id.into()])).await?;
    Ok(result.rows_affected())
}

/// Полная замена набора связей родителя
///
/// Пустые и повторяющиеся id пропускаются. Возвращает число вставленных строк.
pub async fn replace_links<C: ConnectionTrait>(
    db: &C,
    junction: &JunctionTable,
    parent_id: &str,
    child_ids: &[String],
) -> anyhow::Result<usize> {
    let removed = delete_links(db, junction, parent_id).await?;

    let mut inserted: Vec<&str> = Vec::with_capacity(child_ids.len());
    for child in child_ids {
        let child = child.trim();
        if child.is_empty() || inserted.contains(&child) {
            continue;
        }
        let sql = format!(
            "INSERT INTO {} ({}, {}) VALUES (?, ?)",
            junction.table, junction.parent_column, junction.child_column
        );
        db.execute(stmt(sql, vec![parent_id.into(), child.into()]))
            .await?;
        inserted.push(child);
    }

    tracing::debug!(
        "{}: parent {} links replaced ({} removed, {} inserted)",
        junction.table,
        parent_id,
        removed,
        inserted.len()
    );
    Ok(inserted.len())
}

/// Текущий набор связей родителя (отсортирован)
pub async fn load_links<C: ConnectionTrait>(
    db: &C,
    junction: &JunctionTable,
    parent_id: &str,
) -> anyhow::Result<Vec<String>> {
    let sql = format!(
        "SELECT {child} AS child_id FROM {table} WHERE {parent} = ? ORDER BY {child}",
        child = junction.child_column,
        table = junction.table,
        parent = junction.parent_column
    );
    let rows = db.query_all(stmt(sql, vec![parent_id.into()])).await?;
    let mut ids = Vec::with_capacity(rows.len());
    for row in rows {
        ids.push(row.try_get::<String>("", "child_id")?);
    }
    Ok(ids)
}

/// Все связи таблицы, сгруппированные по родителю
pub async fn load_all_links<C: ConnectionTrait>(
    db: &C,
    junction: &JunctionTable,
) -> anyhow::Result<HashMap<String, Vec<String>>> {
    let sql = format!(
        "SELECT {parent} AS parent_id, {child} AS child_id FROM {table} ORDER BY {child}",
        parent = junction.parent_column,
        child = junction.child_column,
        table = junction.table
    );
    let rows = db.query_all(stmt(sql, vec![])).await?;
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        let parent: String = row.try_get("", "parent_id")?;
        let child: String = row.try_get("", "child_id")?;
        map.entry(parent).or_default().push(child);
    }
    Ok(map)
}

/// Удалить дочерний элемент из всех родителей (при удалении самого элемента)
pub async fn delete_children<C: ConnectionTrait>(
    db: &C,
    junction: &JunctionTable,
    child_id: &str,
) -> anyhow::Result<u64> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        junction.table, junction.child_column
    );
    let result = db.execute(stmt(sql, vec![child_id.into()])).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_connection;
    use sea_orm::TransactionTrait;

    const WAREHOUSE_AREAS: JunctionTable = JunctionTable {
        table: "a007_warehouse_servicing_area",
        parent_column: "warehouse_id",
        child_column: "servicing_area_id",
    };

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_replace_inserts_unique_set() {
        let db = test_connection().await;
        let n = replace_links(&db, &WAREHOUSE_AREAS, "w1", &ids(&["b", "a", "b", " "]))
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            load_links(&db, &WAREHOUSE_AREAS, "w1").await.unwrap(),
            ids(&["a", "b"])
        );
    }

    #[tokio::test]
    async fn test_replace_drops_removed_links_and_keeps_other_parents() {
        let db = test_connection().await;
        replace_links(&db, &WAREHOUSE_AREAS, "w1", &ids(&["a", "b", "c"]))
            .await
            .unwrap();
        replace_links(&db, &WAREHOUSE_AREAS, "w2", &ids(&["a"]))
            .await
            .unwrap();

        replace_links(&db, &WAREHOUSE_AREAS, "w1", &ids(&["c", "d"]))
            .await
            .unwrap();
        assert_eq!(
            load_links(&db, &WAREHOUSE_AREAS, "w1").await.unwrap(),
            ids(&["c", "d"])
        );
        assert_eq!(
            load_links(&db, &WAREHOUSE_AREAS, "w2").await.unwrap(),
            ids(&["a"])
        );

        replace_links(&db, &WAREHOUSE_AREAS, "w1", &[]).await.unwrap();
        assert!(load_links(&db, &WAREHOUSE_AREAS, "w1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rolled_back_transaction_keeps_previous_links() {
        let db = test_connection().await;
        replace_links(&db, &WAREHOUSE_AREAS, "w1", &ids(&["a"]))
            .await
            .unwrap();

        let txn = db.begin().await.unwrap();
        replace_links(&txn, &WAREHOUSE_AREAS, "w1", &ids(&["x", "y"]))
            .await
            .unwrap();
        txn.rollback().await.unwrap();

        assert_eq!(
            load_links(&db, &WAREHOUSE_AREAS, "w1").await.unwrap(),
            ids(&["a"])
        );
    }

    #[tokio::test]
    async fn test_load_all_and_delete_children() {
        let db = test_connection().await;
        replace_links(&db, &WAREHOUSE_AREAS, "w1", &ids(&["a", "b"]))
            .await
            .unwrap();
        replace_links(&db, &WAREHOUSE_AREAS, "w2", &ids(&["a"]))
            .await
            .unwrap();

        let all = load_all_links(&db, &WAREHOUSE_AREAS).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["w1"], ids(&["a", "b"]));

        assert_eq!(delete_children(&db, &WAREHOUSE_AREAS, "a").await.unwrap(), 2);
        let all = load_all_links(&db, &WAREHOUSE_AREAS).await.unwrap();
        assert_eq!(all.get("w1"), Some(&ids(&["b"])));
        assert!(!all.contains_key("w2"));
    }
}
