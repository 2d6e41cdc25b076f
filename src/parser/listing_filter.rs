//! Listing search filter construction
//!
//! Translates the optional query parameters of the listing search endpoint
//! into a [`ListingFilter`], a storage-agnostic description of which
//! listings match and how the result page is cut.

use serde::Deserialize;

use super::{SortSpec, parse_int_prefix};

pub const DEFAULT_LIMIT: i64 = 9;

/// Raw search parameters exactly as they arrive on the query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub offer: Option<String>,
    pub furnished: Option<String>,
    pub parking: Option<String>,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    pub price: Option<String>,
    pub q: Option<String>,
    pub location: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<String>,
    pub start_index: Option<String>,
}

/// Constraint on one boolean listing attribute.
///
/// Absent and `"false"` both mean "either value"; only `"true"` narrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagFilter {
    Any,
    OnlyTrue,
}

impl FlagFilter {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("true") => FlagFilter::OnlyTrue,
            _ => FlagFilter::Any,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    Any,
    /// Matched verbatim against the stored type; unknown values match nothing
    Exact(String),
}

impl TypeFilter {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("all") => TypeFilter::Any,
            Some(other) => TypeFilter::Exact(other.to_string()),
        }
    }
}

/// Closed range on the regular price; `max` of `None` is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: i64,
    pub max: Option<i64>,
}

impl PriceRange {
    pub fn from_bucket(value: Option<&str>) -> Option<Self> {
        match value? {
            "1000" => Some(PriceRange { min: 0, max: Some(1000) }),
            "5000" => Some(PriceRange { min: 1001, max: Some(5000) }),
            "5000+" => Some(PriceRange { min: 5000, max: None }),
            _ => None,
        }
    }

    pub fn contains(&self, price: i64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

/// Storage-agnostic listing search
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    pub offer: FlagFilter,
    pub furnished: FlagFilter,
    pub parking: FlagFilter,
    pub listing_type: TypeFilter,
    pub price: Option<PriceRange>,
    /// Case-insensitive substring of the name; empty matches everything
    pub search_term: String,
    /// Case-insensitive substring of the location; empty matches everything
    pub location: String,
    pub sort: SortSpec,
    pub limit: i64,
    pub start_index: i64,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self::from_query(&ListingQuery::default())
    }
}

impl ListingFilter {
    pub fn from_query(query: &ListingQuery) -> Self {
        let limit = query
            .limit
            .as_deref()
            .and_then(parse_int_prefix)
            .filter(|n| *n != 0)
            .map(i64::saturating_abs)
            .unwrap_or(DEFAULT_LIMIT);

        let start_index = query
            .start_index
            .as_deref()
            .and_then(parse_int_prefix)
            .map(|n| n.max(0))
            .unwrap_or(0);

        ListingFilter {
            offer: FlagFilter::from_param(query.offer.as_deref()),
            furnished: FlagFilter::from_param(query.furnished.as_deref()),
            parking: FlagFilter::from_param(query.parking.as_deref()),
            listing_type: TypeFilter::from_param(query.listing_type.as_deref()),
            price: PriceRange::from_bucket(query.price.as_deref()),
            search_term: query.q.clone().unwrap_or_default(),
            location: query.location.clone().unwrap_or_default(),
            sort: SortSpec::from_params(query.sort.as_deref(), query.order.as_deref()),
            limit,
            start_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SortField, SortOrder};

    fn query(pairs: &[(&str, &str)]) -> ListingQuery {
        serde_json::from_value(serde_json::Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect(),
        ))
        .unwrap()
    }

    #[test]
    fn test_flag_truth_table() {
        assert_eq!(FlagFilter::from_param(None), FlagFilter::Any);
        assert_eq!(FlagFilter::from_param(Some("false")), FlagFilter::Any);
        assert_eq!(FlagFilter::from_param(Some("true")), FlagFilter::OnlyTrue);
        assert_eq!(FlagFilter::from_param(Some("TRUE")), FlagFilter::Any);
        assert_eq!(FlagFilter::from_param(Some("yes")), FlagFilter::Any);
        assert_eq!(FlagFilter::from_param(Some("")), FlagFilter::Any);
    }

    #[test]
    fn test_type_filter() {
        assert_eq!(TypeFilter::from_param(None), TypeFilter::Any);
        assert_eq!(TypeFilter::from_param(Some("all")), TypeFilter::Any);
        assert_eq!(
            TypeFilter::from_param(Some("sale")),
            TypeFilter::Exact("sale".to_string())
        );
        assert_eq!(
            TypeFilter::from_param(Some("lease")),
            TypeFilter::Exact("lease".to_string())
        );
    }

    #[test]
    fn test_price_buckets() {
        let low = PriceRange::from_bucket(Some("1000")).unwrap();
        assert!(low.contains(0));
        assert!(low.contains(1000));
        assert!(!low.contains(1001));

        let mid = PriceRange::from_bucket(Some("5000")).unwrap();
        assert!(!mid.contains(1000));
        assert!(mid.contains(1001));
        assert!(mid.contains(5000));
        assert!(!mid.contains(5001));

        let high = PriceRange::from_bucket(Some("5000+")).unwrap();
        assert!(!high.contains(4999));
        assert!(high.contains(5000));
        assert!(high.contains(i64::MAX));

        assert_eq!(PriceRange::from_bucket(None), None);
        assert_eq!(PriceRange::from_bucket(Some("2000")), None);
        assert_eq!(PriceRange::from_bucket(Some("")), None);
    }

    #[test]
    fn test_defaults_when_nothing_given() {
        let filter = ListingFilter::default();
        assert_eq!(filter.offer, FlagFilter::Any);
        assert_eq!(filter.furnished, FlagFilter::Any);
        assert_eq!(filter.parking, FlagFilter::Any);
        assert_eq!(filter.listing_type, TypeFilter::Any);
        assert_eq!(filter.price, None);
        assert_eq!(filter.search_term, "");
        assert_eq!(filter.location, "");
        assert_eq!(filter.sort.field, SortField::CreatedAt);
        assert_eq!(filter.sort.order, SortOrder::Descending);
        assert_eq!(filter.limit, DEFAULT_LIMIT);
        assert_eq!(filter.start_index, 0);
    }

    #[test]
    fn test_full_query() {
        let filter = ListingFilter::from_query(&query(&[
            ("offer", "true"),
            ("furnished", "false"),
            ("type", "rent"),
            ("price", "5000"),
            ("q", "Loft"),
            ("location", "porto"),
            ("sort", "regularPrice"),
            ("order", "asc"),
            ("limit", "3"),
            ("startIndex", "6"),
        ]));

        assert_eq!(filter.offer, FlagFilter::OnlyTrue);
        assert_eq!(filter.furnished, FlagFilter::Any);
        assert_eq!(filter.parking, FlagFilter::Any);
        assert_eq!(filter.listing_type, TypeFilter::Exact("rent".to_string()));
        assert_eq!(filter.price, Some(PriceRange { min: 1001, max: Some(5000) }));
        assert_eq!(filter.search_term, "Loft");
        assert_eq!(filter.location, "porto");
        assert_eq!(filter.sort.field, SortField::RegularPrice);
        assert_eq!(filter.sort.order, SortOrder::Ascending);
        assert_eq!(filter.limit, 3);
        assert_eq!(filter.start_index, 6);
    }

    #[test]
    fn test_permissive_paging() {
        let filter = ListingFilter::from_query(&query(&[("limit", "12abc"), ("startIndex", "x")]));
        assert_eq!(filter.limit, 12);
        assert_eq!(filter.start_index, 0);

        let filter = ListingFilter::from_query(&query(&[("limit", "0"), ("startIndex", "-4")]));
        assert_eq!(filter.limit, DEFAULT_LIMIT);
        assert_eq!(filter.start_index, 0);

        let filter = ListingFilter::from_query(&query(&[("limit", "-5"), ("startIndex", " 18.7")]));
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.start_index, 18);
    }
}
