use super::super::filter::FilterConverter;

/// PostgreSQL-specific filter converter for listing searches
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresFilterConverter;

impl PostgresFilterConverter {
    pub fn new() -> Self {
        Self
    }
}

impl FilterConverter for PostgresFilterConverter {
    fn get_param_placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn case_insensitive_like(&self, column: &str, placeholder: &str) -> String {
        format!("{} ILIKE {} ESCAPE '\\'", column, placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::database::filter::FilterValue;
    use crate::parser::{FlagFilter, ListingFilter, SortField, SortOrder, SortSpec};

    #[test]
    fn test_placeholders_and_ilike() {
        let converter = PostgresFilterConverter::new();
        let filter = ListingFilter {
            furnished: FlagFilter::OnlyTrue,
            search_term: "loft".to_string(),
            sort: SortSpec::new(SortField::Name, SortOrder::Descending),
            limit: 20,
            start_index: 40,
            ..Default::default()
        };

        let search = converter.to_search_sql(&filter);

        assert_eq!(
            search.where_clause,
            " WHERE furnished = $1 AND name ILIKE $2 ESCAPE '\\'"
        );
        assert_eq!(search.order_by, " ORDER BY name DESC, id ASC");
        assert_eq!(search.pagination, " LIMIT $3 OFFSET $4");
        assert_eq!(
            search.params,
            vec![
                FilterValue::Bool(true),
                FilterValue::Text("%loft%".to_string()),
                FilterValue::Integer(20),
                FilterValue::Integer(40),
            ]
        );
    }
}
