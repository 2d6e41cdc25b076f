use crate::error::{AppError, AppResult};
use sqlx::PgPool;

const USERS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        profile_photo TEXT NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
"#;

const LISTINGS_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS listings (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        location TEXT NOT NULL,
        regular_price BIGINT NOT NULL CHECK (regular_price >= 0),
        discount_price BIGINT NOT NULL DEFAULT 0 CHECK (discount_price >= 0),
        bedrooms INTEGER NOT NULL,
        bathrooms INTEGER NOT NULL,
        furnished BOOLEAN NOT NULL DEFAULT FALSE,
        parking BOOLEAN NOT NULL DEFAULT FALSE,
        listing_type TEXT NOT NULL CHECK (listing_type IN ('sale', 'rent')),
        offer BOOLEAN NOT NULL DEFAULT FALSE,
        image_urls TEXT[] NOT NULL DEFAULT '{}',
        user_id TEXT NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
"#;

const INDEXES_SQL: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_listings_user_id ON listings (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_listings_created_at ON listings (created_at)",
    "CREATE INDEX IF NOT EXISTS idx_listings_regular_price ON listings (regular_price)",
];

/// Initialize the database schema for PostgreSQL
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    sqlx::query(USERS_TABLE_SQL)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

    sqlx::query(LISTINGS_TABLE_SQL)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create listings table: {}", e)))?;

    for sql in INDEXES_SQL {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create index: {}", e)))?;
    }

    Ok(())
}
