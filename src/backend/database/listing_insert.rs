use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{Listing, NewListing};
use crate::utils::current_timestamp;

/// Database-specific adapter for listing INSERT operations
#[async_trait]
pub trait ListingInserter: Send + Sync {
    /// Persist a fully prepared listing
    async fn execute_listing_insert(&self, listing: &Listing) -> AppResult<()>;
}

/// Shared business logic for listing INSERT operations
pub struct ListingInsertProcessor;

impl ListingInsertProcessor {
    /// Check the field constraints every stored listing satisfies
    ///
    /// - name, description and location are non-empty
    /// - prices are non-negative
    /// - at least one bedroom and one bathroom
    /// - an offer's discounted price is below the regular price
    pub fn validate_listing(listing: &Listing) -> AppResult<()> {
        for (field, value) in [
            ("name", &listing.name),
            ("description", &listing.description),
            ("location", &listing.location),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("Listing {} is required", field)));
            }
        }

        if listing.regular_price < 0 || listing.discount_price < 0 {
            return Err(AppError::BadRequest(
                "Listing prices cannot be negative".to_string(),
            ));
        }

        if listing.bedrooms < 1 || listing.bathrooms < 1 {
            return Err(AppError::BadRequest(
                "A listing needs at least one bedroom and one bathroom".to_string(),
            ));
        }

        if listing.offer && listing.discount_price >= listing.regular_price {
            return Err(AppError::BadRequest(
                "Discount price must be lower than regular price".to_string(),
            ));
        }

        Ok(())
    }

    /// Build a new listing with a fresh ID and timestamps
    pub fn prepare_listing(owner_id: &str, new_listing: &NewListing) -> AppResult<Listing> {
        let now = current_timestamp();
        let listing = Listing {
            id: uuid::Uuid::new_v4().to_string(),
            name: new_listing.name.clone(),
            description: new_listing.description.clone(),
            location: new_listing.location.clone(),
            regular_price: new_listing.regular_price,
            discount_price: new_listing.discount_price,
            bedrooms: new_listing.bedrooms,
            bathrooms: new_listing.bathrooms,
            furnished: new_listing.furnished,
            parking: new_listing.parking,
            listing_type: new_listing.listing_type,
            offer: new_listing.offer,
            image_urls: new_listing.image_urls.clone(),
            user_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        Self::validate_listing(&listing)?;
        Ok(listing)
    }
}

/// Unified listing INSERT operations using the adapter pattern
pub struct UnifiedListingInsertOps<T: ListingInserter> {
    inserter: T,
}

impl<T: ListingInserter> UnifiedListingInsertOps<T> {
    pub fn new(inserter: T) -> Self {
        Self { inserter }
    }

    pub async fn create_listing(&self, owner_id: &str, new_listing: &NewListing) -> AppResult<Listing> {
        let listing = ListingInsertProcessor::prepare_listing(owner_id, new_listing)?;
        self.inserter.execute_listing_insert(&listing).await?;
        Ok(listing)
    }
}
