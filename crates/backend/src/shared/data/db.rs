use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Схема БД: (имя таблицы/индекса, DDL)
///
/// Все операторы идемпотентны, выполняются по одному при каждом старте.
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_category",
        r#"CREATE TABLE IF NOT EXISTS a001_category (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            parent_id TEXT,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a002_attribute",
        r#"CREATE TABLE IF NOT EXISTS a002_attribute (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            data_type TEXT NOT NULL DEFAULT 'text',
            unit TEXT,
            options TEXT NOT NULL DEFAULT '[]',
            is_filterable INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a003_specification",
        r#"CREATE TABLE IF NOT EXISTS a003_specification (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            category_id TEXT,
            unit TEXT,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_required INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a004_manufacturer",
        r#"CREATE TABLE IF NOT EXISTS a004_manufacturer (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            website TEXT,
            country TEXT,
            contact_email TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a005_supplier",
        r#"CREATE TABLE IF NOT EXISTS a005_supplier (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            contact_name TEXT,
            email TEXT,
            phone TEXT,
            address TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a006_product",
        r#"CREATE TABLE IF NOT EXISTS a006_product (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            category_id TEXT,
            manufacturer_id TEXT,
            supplier_id TEXT,
            list_price REAL NOT NULL DEFAULT 0,
            cost_price REAL NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'draft',
            barcode TEXT,
            weight_kg REAL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "idx_a006_product_category",
        "CREATE INDEX IF NOT EXISTS idx_a006_product_category ON a006_product (category_id)",
    ),
    (
        "a006_product_attachment",
        r#"CREATE TABLE IF NOT EXISTS a006_product_attachment (
            id TEXT PRIMARY KEY NOT NULL,
            product_id TEXT NOT NULL,
            kind TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            payload TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )"#,
    ),
    (
        "idx_a006_attachment_product",
        "CREATE INDEX IF NOT EXISTS idx_a006_attachment_product ON a006_product_attachment (product_id, kind)",
    ),
    (
        "a007_warehouse",
        r#"CREATE TABLE IF NOT EXISTS a007_warehouse (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            address TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a007_warehouse_servicing_area",
        r#"CREATE TABLE IF NOT EXISTS a007_warehouse_servicing_area (
            warehouse_id TEXT NOT NULL,
            servicing_area_id TEXT NOT NULL,
            PRIMARY KEY (warehouse_id, servicing_area_id)
        )"#,
    ),
    (
        "a008_servicing_area",
        r#"CREATE TABLE IF NOT EXISTS a008_servicing_area (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            region TEXT,
            postal_codes TEXT NOT NULL DEFAULT '[]',
            delivery_days INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a009_inventory",
        r#"CREATE TABLE IF NOT EXISTS a009_inventory (
            id TEXT PRIMARY KEY NOT NULL,
            product_id TEXT NOT NULL,
            warehouse_id TEXT NOT NULL,
            quantity_on_hand INTEGER NOT NULL DEFAULT 0,
            quantity_reserved INTEGER NOT NULL DEFAULT 0,
            reorder_point INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL,
            UNIQUE (product_id, warehouse_id)
        )"#,
    ),
    (
        "a010_pricing_policy",
        r#"CREATE TABLE IF NOT EXISTS a010_pricing_policy (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            adjustment_kind TEXT NOT NULL DEFAULT 'percent',
            adjustment_value REAL NOT NULL DEFAULT 0,
            priority INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            valid_from TEXT,
            valid_to TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a011_promotion",
        r#"CREATE TABLE IF NOT EXISTS a011_promotion (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            discount_kind TEXT NOT NULL DEFAULT 'percent',
            discount_value REAL NOT NULL DEFAULT 0,
            starts_on TEXT,
            ends_on TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a012_supplier_pricing",
        r#"CREATE TABLE IF NOT EXISTS a012_supplier_pricing (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            comment TEXT,
            supplier_id TEXT NOT NULL,
            discount_percent REAL NOT NULL DEFAULT 0,
            min_order_qty INTEGER NOT NULL DEFAULT 0,
            lead_time_days INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "a013_pricing_rule",
        r#"CREATE TABLE IF NOT EXISTS a013_pricing_rule (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            price_base TEXT NOT NULL DEFAULT 'cost',
            markup_percent REAL NOT NULL DEFAULT 0,
            rounding TEXT NOT NULL DEFAULT 'none',
            priority INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        )"#,
    ),
    (
        "pricing_scope_item",
        r#"CREATE TABLE IF NOT EXISTS pricing_scope_item (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_kind TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            item_kind TEXT NOT NULL,
            item_id TEXT NOT NULL,
            mode TEXT NOT NULL,
            UNIQUE (owner_kind, owner_id, item_kind, item_id)
        )"#,
    ),
    (
        "idx_pricing_scope_owner",
        "CREATE INDEX IF NOT EXISTS idx_pricing_scope_owner ON pricing_scope_item (owner_kind, owner_id)",
    ),
    (
        "system_log",
        r#"CREATE TABLE IF NOT EXISTS system_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            source TEXT NOT NULL,
            category TEXT NOT NULL,
            message TEXT NOT NULL
        )"#,
    ),
];

/// Применить схему (CREATE ... IF NOT EXISTS), по одному оператору
pub async fn apply_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    for (name, ddl) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, ddl.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("schema step '{}' failed: {}", name, e))?;
    }
    tracing::info!("Database schema ready ({} statements)", SCHEMA.len());
    Ok(())
}

/// `sqlite://` URL для файла БД (с учётом путей Windows)
pub fn sqlite_url(db_file: &Path) -> String {
    let normalized = db_file.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = sqlite_url(&absolute_path);
    tracing::info!("Connecting to {}", db_url);

    let conn = Database::connect(&db_url).await?;
    apply_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Database connection is already initialized"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// In-memory БД со схемой для тестов
///
/// Одно соединение в пуле: у каждого соединения `:memory:` своя база.
#[cfg(test)]
pub async fn test_connection() -> DatabaseConnection {
    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(options).await.unwrap();
    apply_schema(&conn).await.unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(conn: &DatabaseConnection) -> Vec<String> {
        conn.query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name".to_string(),
        ))
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.try_get::<String>("", "name").unwrap())
        .collect()
    }

    #[tokio::test]
    async fn test_schema_creates_all_tables() {
        let conn = test_connection().await;
        let tables = table_names(&conn).await;
        for expected in [
            "a001_category",
            "a006_product",
            "a006_product_attachment",
            "a007_warehouse_servicing_area",
            "a009_inventory",
            "pricing_scope_item",
            "system_log",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let conn = test_connection().await;
        apply_schema(&conn).await.unwrap();
        let before = table_names(&conn).await.len();
        apply_schema(&conn).await.unwrap();
        assert_eq!(table_names(&conn).await.len(), before);
    }

    #[test]
    fn test_sqlite_url() {
        assert_eq!(
            sqlite_url(Path::new("/opt/app/db/catalog.db")),
            "sqlite:///opt/app/db/catalog.db?mode=rwc"
        );
        assert_eq!(
            sqlite_url(Path::new("C:\\app\\catalog.db")),
            "sqlite:///C:/app/catalog.db?mode=rwc"
        );
    }
}
