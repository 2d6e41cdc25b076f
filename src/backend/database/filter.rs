use crate::parser::{FlagFilter, ListingFilter, SortOrder, SortSpec, TypeFilter};

/// A value bound to a placeholder of a generated query
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

/// Listing search translated into SQL fragments
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSearchSql {
    /// Either empty or starting with ` WHERE `
    pub where_clause: String,
    /// Starts with ` ORDER BY `
    pub order_by: String,
    /// ` LIMIT .. OFFSET ..` with placeholders
    pub pagination: String,
    pub params: Vec<FilterValue>,
}

/// Trait for converting listing filters to database-specific queries
///
/// Dialects only differ in placeholder syntax and case-insensitive matching;
/// the conversion itself is shared.
pub trait FilterConverter: Send + Sync {
    /// Get the parameter placeholder for the given 1-based index
    ///
    /// For example:
    /// - PostgreSQL: $1, $2, $3...
    /// - SQLite: ?1, ?2, ?3...
    fn get_param_placeholder(&self, index: usize) -> String;

    /// Case-insensitive LIKE of `column` against the pattern at `placeholder`
    fn case_insensitive_like(&self, column: &str, placeholder: &str) -> String;

    /// Build WHERE conditions for the filter document
    fn to_where_clause(&self, filter: &ListingFilter) -> (String, Vec<FilterValue>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        for (column, flag) in [
            ("offer", filter.offer),
            ("furnished", filter.furnished),
            ("parking", filter.parking),
        ] {
            if flag == FlagFilter::OnlyTrue {
                params.push(FilterValue::Bool(true));
                conditions.push(format!(
                    "{} = {}",
                    column,
                    self.get_param_placeholder(params.len())
                ));
            }
        }

        if let TypeFilter::Exact(ref listing_type) = filter.listing_type {
            params.push(FilterValue::Text(listing_type.clone()));
            conditions.push(format!(
                "listing_type = {}",
                self.get_param_placeholder(params.len())
            ));
        }

        if let Some(range) = filter.price {
            params.push(FilterValue::Integer(range.min));
            conditions.push(format!(
                "regular_price >= {}",
                self.get_param_placeholder(params.len())
            ));
            if let Some(max) = range.max {
                params.push(FilterValue::Integer(max));
                conditions.push(format!(
                    "regular_price <= {}",
                    self.get_param_placeholder(params.len())
                ));
            }
        }

        for (column, needle) in [("name", &filter.search_term), ("location", &filter.location)] {
            if !needle.is_empty() {
                params.push(FilterValue::Text(like_pattern(&fold_case(needle))));
                conditions.push(
                    self.case_insensitive_like(column, &self.get_param_placeholder(params.len())),
                );
            }
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }

    /// ORDER BY clause; ties are broken by id for stable paging
    fn to_order_by(&self, sort: &SortSpec) -> String {
        let direction = match sort.order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        format!(" ORDER BY {} {}, id ASC", sort.field.column(), direction)
    }

    /// Full translation of a search including paging
    fn to_search_sql(&self, filter: &ListingFilter) -> ListingSearchSql {
        let (where_clause, mut params) = self.to_where_clause(filter);

        params.push(FilterValue::Integer(filter.limit));
        let limit = self.get_param_placeholder(params.len());
        params.push(FilterValue::Integer(filter.start_index));
        let offset = self.get_param_placeholder(params.len());

        ListingSearchSql {
            where_clause,
            order_by: self.to_order_by(&filter.sort),
            pagination: format!(" LIMIT {} OFFSET {}", limit, offset),
            params,
        }
    }
}

/// Unicode lowercase used for case-insensitive text matching
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Wrap user input in `%..%`, escaping LIKE metacharacters with `\`
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("loft"), "%loft%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }

    #[test]
    fn test_fold_case_handles_non_ascii() {
        assert_eq!(fold_case("Élan LOFT"), "élan loft");
        assert_eq!(fold_case("SÃO PAULO"), "são paulo");
    }
}
