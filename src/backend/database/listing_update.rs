use async_trait::async_trait;

use super::listing_insert::ListingInsertProcessor;
use crate::error::AppResult;
use crate::models::{Listing, ListingUpdate};
use crate::utils::current_timestamp;

/// Database-specific adapter for listing UPDATE operations
#[async_trait]
pub trait ListingUpdater: Send + Sync {
    /// Load the current state of a listing
    async fn fetch_listing(&self, id: &str) -> AppResult<Option<Listing>>;

    /// Write back every mutable column of a listing; returns whether a row changed
    async fn execute_listing_update(&self, listing: &Listing) -> AppResult<bool>;
}

/// Shared business logic for listing UPDATE operations
pub struct ListingUpdateProcessor;

impl ListingUpdateProcessor {
    /// Merge a partial update onto the stored listing and re-validate it
    pub fn merge(existing: &Listing, update: &ListingUpdate) -> AppResult<Listing> {
        let mut merged = existing.clone();
        update.apply_to(&mut merged);
        merged.updated_at = current_timestamp();

        ListingInsertProcessor::validate_listing(&merged)?;
        Ok(merged)
    }
}

/// Unified listing UPDATE operations using the adapter pattern
pub struct UnifiedListingUpdateOps<T: ListingUpdater> {
    updater: T,
}

impl<T: ListingUpdater> UnifiedListingUpdateOps<T> {
    pub fn new(updater: T) -> Self {
        Self { updater }
    }

    pub async fn update_listing(
        &self,
        id: &str,
        update: &ListingUpdate,
    ) -> AppResult<Option<Listing>> {
        let Some(existing) = self.updater.fetch_listing(id).await? else {
            return Ok(None);
        };

        let merged = ListingUpdateProcessor::merge(&existing, update)?;

        if !self.updater.execute_listing_update(&merged).await? {
            // Deleted between read and write
            return Ok(None);
        }

        Ok(Some(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::ListingType;

    fn stored() -> Listing {
        let created = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        Listing {
            id: "l1".to_string(),
            name: "House".to_string(),
            description: "Garden".to_string(),
            location: "Braga".to_string(),
            regular_price: 3000,
            discount_price: 0,
            bedrooms: 3,
            bathrooms: 2,
            furnished: false,
            parking: true,
            listing_type: ListingType::Sale,
            offer: false,
            image_urls: vec![],
            user_id: "u1".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_merge_applies_and_touches_timestamp() {
        let update = ListingUpdate {
            regular_price: Some(2500),
            ..Default::default()
        };
        let merged = ListingUpdateProcessor::merge(&stored(), &update).unwrap();

        assert_eq!(merged.regular_price, 2500);
        assert_eq!(merged.created_at, stored().created_at);
        assert!(merged.updated_at > stored().updated_at);
    }

    #[test]
    fn test_merge_validates_combined_state() {
        // Turning on an offer without a lower discount is rejected
        let update = ListingUpdate {
            offer: Some(true),
            ..Default::default()
        };
        assert!(matches!(
            ListingUpdateProcessor::merge(&stored(), &update),
            Err(AppError::BadRequest(_))
        ));

        let update = ListingUpdate {
            offer: Some(true),
            discount_price: Some(2800),
            ..Default::default()
        };
        assert!(ListingUpdateProcessor::merge(&stored(), &update).is_ok());
    }
}
