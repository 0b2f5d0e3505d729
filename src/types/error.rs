use thiserror::Error;

/// Errors produced while loading and compiling a rule catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file contained no header row.
    #[error("catalog is empty; expected a header row")]
    EmptyCatalog,

    /// A required column is absent from the header row.
    #[error("catalog header is missing required column '{column}'")]
    MissingColumn {
        /// The column name that was not found.
        column: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_message() {
        let err = CatalogError::MissingColumn { column: "Query" };
        assert_eq!(
            err.to_string(),
            "catalog header is missing required column 'Query'"
        );
    }

    #[test]
    fn empty_catalog_message() {
        assert_eq!(
            CatalogError::EmptyCatalog.to_string(),
            "catalog is empty; expected a header row"
        );
    }
}
