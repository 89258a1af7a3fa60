use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, FromRow)]
pub struct SessionEntry {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

pub async fn fetch_value(db: &SqlitePool, key: &str) -> Result<Option<SessionEntry>, sqlx::Error> {
    sqlx::query_as::<_, SessionEntry>(
        "SELECT key, value, updated_at FROM session_kv WHERE key = ?"
    )
    .bind(key)
    .fetch_optional(db)
    .await
}

pub async fn put_value(db: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO session_kv (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn delete_value(db: &SqlitePool, key: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM session_kv WHERE key = ?")
        .bind(key)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
