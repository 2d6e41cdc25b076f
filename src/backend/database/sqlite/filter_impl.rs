use super::super::filter::FilterConverter;

/// SQLite-specific filter converter for listing searches
///
/// SQLite only folds ASCII case, so text search runs against the
/// `*_folded` columns written with `fold_case`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteFilterConverter;

impl SqliteFilterConverter {
    pub fn new() -> Self {
        Self
    }
}

impl FilterConverter for SqliteFilterConverter {
    fn get_param_placeholder(&self, index: usize) -> String {
        format!("?{}", index)
    }

    fn case_insensitive_like(&self, column: &str, placeholder: &str) -> String {
        format!("{}_folded LIKE {} ESCAPE '\\'", column, placeholder)
    }
}
