#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Only the exact `asc` sorts ascending
    pub fn from_str(s: &str) -> SortOrder {
        match s {
            "asc" => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

/// Listing attributes a search can be ordered by
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    RegularPrice,
    DiscountPrice,
    Name,
}

impl SortField {
    /// Unknown attributes fall back to creation time
    pub fn from_param(s: &str) -> SortField {
        match s {
            "updatedAt" => SortField::UpdatedAt,
            "regularPrice" => SortField::RegularPrice,
            "discountPrice" => SortField::DiscountPrice,
            "name" => SortField::Name,
            _ => SortField::CreatedAt,
        }
    }

    /// Storage column backing the attribute
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::RegularPrice => "regular_price",
            SortField::DiscountPrice => "discount_price",
            SortField::Name => "name",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::new(SortField::CreatedAt, SortOrder::Descending)
    }
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        SortSpec { field, order }
    }

    /// Parse the `sort` and `order` query parameters
    pub fn from_params(sort: Option<&str>, order: Option<&str>) -> SortSpec {
        let field = sort.map(SortField::from_param).unwrap_or(SortField::CreatedAt);
        let order = order.map(SortOrder::from_str).unwrap_or(SortOrder::Descending);
        SortSpec::new(field, order)
    }
}
