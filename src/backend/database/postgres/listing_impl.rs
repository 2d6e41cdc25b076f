use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::super::filter::{FilterConverter, FilterValue};
use super::super::listing_delete::ListingDeleter;
use super::super::listing_insert::ListingInserter;
use super::super::listing_read::ListingReader;
use super::super::listing_update::ListingUpdater;
use super::super::map_database_error;
use super::filter_impl::PostgresFilterConverter;
use crate::error::{AppError, AppResult};
use crate::models::{Listing, ListingType};
use crate::parser::ListingFilter;

const LISTING_COLUMNS: &str = "id, name, description, location, regular_price, discount_price, \
    bedrooms, bathrooms, furnished, parking, listing_type, offer, image_urls, user_id, \
    created_at, updated_at";

fn row_to_listing(row: &PgRow) -> AppResult<Listing> {
    let listing_type: String = row.try_get("listing_type")?;

    Ok(Listing {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        location: row.try_get("location")?,
        regular_price: row.try_get("regular_price")?,
        discount_price: row.try_get("discount_price")?,
        bedrooms: row.try_get("bedrooms")?,
        bathrooms: row.try_get("bathrooms")?,
        furnished: row.try_get("furnished")?,
        parking: row.try_get("parking")?,
        listing_type: ListingType::parse(&listing_type).ok_or_else(|| {
            AppError::Database(format!("Unknown listing type stored: {}", listing_type))
        })?,
        offer: row.try_get("offer")?,
        image_urls: row.try_get("image_urls")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

async fn select_listing_by_id(pool: &PgPool, id: &str) -> AppResult<Option<Listing>> {
    let sql = format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch listing: {}", e)))?;

    row.as_ref().map(row_to_listing).transpose()
}

/// PostgreSQL-specific implementation of ListingInserter
pub struct PostgresListingInserter {
    pool: PgPool,
}

impl PostgresListingInserter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingInserter for PostgresListingInserter {
    async fn execute_listing_insert(&self, listing: &Listing) -> AppResult<()> {
        let sql = format!(
            "INSERT INTO listings ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
            LISTING_COLUMNS
        );

        sqlx::query(&sql)
            .bind(&listing.id)
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(&listing.location)
            .bind(listing.regular_price)
            .bind(listing.discount_price)
            .bind(listing.bedrooms)
            .bind(listing.bathrooms)
            .bind(listing.furnished)
            .bind(listing.parking)
            .bind(listing.listing_type.as_str())
            .bind(listing.offer)
            .bind(&listing.image_urls)
            .bind(&listing.user_id)
            .bind(listing.created_at)
            .bind(listing.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "Listing"))?;

        Ok(())
    }
}

/// PostgreSQL-specific implementation of ListingReader
pub struct PostgresListingReader {
    pool: PgPool,
    filter_converter: PostgresFilterConverter,
}

impl PostgresListingReader {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            filter_converter: PostgresFilterConverter::new(),
        }
    }
}

#[async_trait]
impl ListingReader for PostgresListingReader {
    async fn find_listing_by_id(&self, id: &str) -> AppResult<Option<Listing>> {
        select_listing_by_id(&self.pool, id).await
    }

    async fn find_listings(&self, filter: &ListingFilter) -> AppResult<Vec<Listing>> {
        let search = self.filter_converter.to_search_sql(filter);
        let sql = format!(
            "SELECT {} FROM listings{}{}{}",
            LISTING_COLUMNS, search.where_clause, search.order_by, search.pagination
        );

        let mut query = sqlx::query(&sql);
        for param in &search.params {
            query = match param {
                FilterValue::Text(value) => query.bind(value.clone()),
                FilterValue::Integer(value) => query.bind(*value),
                FilterValue::Bool(value) => query.bind(*value),
            };
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to search listings: {}", e)))?;

        rows.iter().map(row_to_listing).collect()
    }

    async fn find_listings_by_user(&self, user_id: &str) -> AppResult<Vec<Listing>> {
        let sql = format!(
            "SELECT {} FROM listings WHERE user_id = $1 ORDER BY created_at DESC, id ASC",
            LISTING_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch user listings: {}", e)))?;

        rows.iter().map(row_to_listing).collect()
    }
}

/// PostgreSQL-specific implementation of ListingUpdater
pub struct PostgresListingUpdater {
    pool: PgPool,
}

impl PostgresListingUpdater {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingUpdater for PostgresListingUpdater {
    async fn fetch_listing(&self, id: &str) -> AppResult<Option<Listing>> {
        select_listing_by_id(&self.pool, id).await
    }

    async fn execute_listing_update(&self, listing: &Listing) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE listings SET name = $1, description = $2, location = $3, regular_price = $4, \
             discount_price = $5, bedrooms = $6, bathrooms = $7, furnished = $8, parking = $9, \
             listing_type = $10, offer = $11, image_urls = $12, updated_at = $13 WHERE id = $14",
        )
        .bind(&listing.name)
        .bind(&listing.description)
        .bind(&listing.location)
        .bind(listing.regular_price)
        .bind(listing.discount_price)
        .bind(listing.bedrooms)
        .bind(listing.bathrooms)
        .bind(listing.furnished)
        .bind(listing.parking)
        .bind(listing.listing_type.as_str())
        .bind(listing.offer)
        .bind(&listing.image_urls)
        .bind(listing.updated_at)
        .bind(&listing.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_database_error(e, "Listing"))?;

        Ok(result.rows_affected() > 0)
    }
}

/// PostgreSQL-specific implementation of ListingDeleter
pub struct PostgresListingDeleter {
    pool: PgPool,
}

impl PostgresListingDeleter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingDeleter for PostgresListingDeleter {
    async fn execute_listing_delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete listing: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
