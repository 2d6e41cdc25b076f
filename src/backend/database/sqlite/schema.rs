use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

const USERS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        profile_photo TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

const LISTINGS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS listings (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        location TEXT NOT NULL,
        regular_price INTEGER NOT NULL,
        discount_price INTEGER NOT NULL DEFAULT 0,
        bedrooms INTEGER NOT NULL,
        bathrooms INTEGER NOT NULL,
        furnished INTEGER NOT NULL DEFAULT 0,
        parking INTEGER NOT NULL DEFAULT 0,
        listing_type TEXT NOT NULL CHECK (listing_type IN ('sale', 'rent')),
        offer INTEGER NOT NULL DEFAULT 0,
        image_urls TEXT NOT NULL DEFAULT '[]',
        user_id TEXT NOT NULL,
        name_folded TEXT NOT NULL DEFAULT '',
        location_folded TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

/// Initialize the database schema for SQLite
///
/// Creates the users and listings tables along with the indexes used by
/// the search endpoint. Safe to run on every startup.
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(USERS_TABLE_SQL)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

    sqlx::query(LISTINGS_TABLE_SQL)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create listings table: {}", e)))?;

    create_indexes(pool).await
}

async fn create_indexes(pool: &SqlitePool) -> AppResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_listings_user_id ON listings (user_id)",
        "CREATE INDEX IF NOT EXISTS idx_listings_created_at ON listings (created_at)",
        "CREATE INDEX IF NOT EXISTS idx_listings_regular_price ON listings (regular_price)",
    ];

    for sql in indexes {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create index: {}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        for table in ["users", "listings"] {
            let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(count.0, 0);
        }

        let (indexes,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_listings_%'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(indexes, 3);
    }
}
