use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid property type: {0}")]
    InvalidPropertyType(String),

    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),
}

impl FilterError {
    /// Query parameter the error belongs to, for the 400 field-error map.
    pub fn field(&self) -> &'static str {
        match self {
            FilterError::InvalidLimit(_) => "limit",
            FilterError::InvalidOffset(_) => "offset",
            FilterError::InvalidStatus(_) => "status",
            FilterError::InvalidPropertyType(_) => "property_type",
            FilterError::InvalidSortOrder(_) => "sort_order",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Allow-listed sort columns for the listing endpoint. Everything else falls
/// back to `CreatedAt` instead of erroring, so stale or experimental client
/// sort keys degrade gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Price,
    Title,
    Bedrooms,
    Bathrooms,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Price => "price",
            SortField::Title => "title",
            SortField::Bedrooms => "bedrooms",
            SortField::Bathrooms => "bathrooms",
        }
    }

    /// Map a client-supplied sort key to a column, falling back to the
    /// default field for anything unrecognized.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("price") => SortField::Price,
            Some("title") => SortField::Title,
            Some("bedrooms") => SortField::Bedrooms,
            Some("bathrooms") => SortField::Bathrooms,
            _ => SortField::CreatedAt,
        }
    }
}

/// A composed SQL statement plus its positional text parameters, in `$1..$n`
/// order. Filter values are always bound, never interpolated.
#[derive(Debug, Clone)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<String>,
}
