use serde::Deserialize;

use super::types::{FilterError, SortDirection, SortField, SqlQuery};
use crate::database::models::{PropertyStatus, PropertyType};

/// Query parameters exactly as they arrive on GET /properties, before any
/// coercion. Kept stringly-typed so validation failures produce field-level
/// 400s instead of an opaque deserialization rejection.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawPropertySearch {
    pub query: Option<String>,
    pub status: Option<String>,
    pub property_type: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Validated filter/sort/pagination request for the property listing.
#[derive(Debug, Clone)]
pub struct PropertySearch {
    pub query: Option<String>,
    pub status: Option<PropertyStatus>,
    pub property_type: Option<PropertyType>,
    pub limit: i64,
    pub offset: i64,
    pub sort_by: SortField,
    pub sort_order: SortDirection,
}

impl PropertySearch {
    /// Validate raw query parameters.
    ///
    /// Filters, pagination and `sort_order` are strict (unknown status
    /// values, zero or negative limits, negative offsets and directions
    /// other than asc/desc are rejected); `sort_by` is deliberately
    /// permissive and falls back to the default field.
    pub fn parse(raw: RawPropertySearch) -> Result<Self, FilterError> {
        let api = &crate::config::config().api;

        let query = raw
            .query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        let status = match raw.status.as_deref() {
            None | Some("") => None,
            Some(s) => Some(
                PropertyStatus::parse(s).ok_or_else(|| FilterError::InvalidStatus(s.to_string()))?,
            ),
        };

        let property_type = match raw.property_type.as_deref() {
            None | Some("") => None,
            Some(s) => Some(
                PropertyType::parse(s)
                    .ok_or_else(|| FilterError::InvalidPropertyType(s.to_string()))?,
            ),
        };

        let limit = match raw.limit.as_deref() {
            None | Some("") => api.default_page_size,
            Some(s) => {
                let n: i64 = s
                    .parse()
                    .map_err(|_| FilterError::InvalidLimit(s.to_string()))?;
                if n <= 0 {
                    return Err(FilterError::InvalidLimit(s.to_string()));
                }
                n.min(api.max_page_size)
            }
        };

        let offset = match raw.offset.as_deref() {
            None | Some("") => 0,
            Some(s) => {
                let n: i64 = s
                    .parse()
                    .map_err(|_| FilterError::InvalidOffset(s.to_string()))?;
                if n < 0 {
                    return Err(FilterError::InvalidOffset(s.to_string()));
                }
                n
            }
        };

        let sort_by = SortField::parse_or_default(raw.sort_by.as_deref());
        let sort_order = match raw.sort_order.as_deref() {
            None | Some("") => SortDirection::Desc,
            Some(s) if s.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(s) if s.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(s) => return Err(FilterError::InvalidSortOrder(s.to_string())),
        };

        Ok(Self {
            query,
            status,
            property_type,
            limit,
            offset,
            sort_by,
            sort_order,
        })
    }

    /// Compose the filtered, sorted, paginated listing query.
    pub fn to_sql(&self) -> SqlQuery {
        let (where_clause, params) = self.where_clause();
        let sql = format!(
            "SELECT * FROM properties WHERE {} ORDER BY {} {} LIMIT {} OFFSET {}",
            where_clause,
            self.sort_by.column(),
            self.sort_order.to_sql(),
            self.limit,
            self.offset,
        );
        SqlQuery { sql, params }
    }

    /// Compose the matching-row count query: same predicates, no pagination.
    pub fn to_count_sql(&self) -> SqlQuery {
        let (where_clause, params) = self.where_clause();
        let sql = format!(
            "SELECT COUNT(*) as count FROM properties WHERE {}",
            where_clause
        );
        SqlQuery { sql, params }
    }

    /// Base predicate plus one bound predicate per supplied filter.
    ///
    /// Soft-deleted rows are excluded unconditionally; this clause is shared
    /// by the page query and the count query so both see the same set.
    fn where_clause(&self) -> (String, Vec<String>) {
        let mut conditions = vec!["is_deleted = false".to_string()];
        let mut params: Vec<String> = Vec::new();

        if let Some(query) = &self.query {
            params.push(format!("%{}%", query));
            let idx = params.len();
            conditions.push(format!(
                "(title ILIKE ${idx} OR description ILIKE ${idx} OR street ILIKE ${idx} OR city ILIKE ${idx})"
            ));
        }
        if let Some(status) = self.status {
            params.push(status.as_str().to_string());
            conditions.push(format!("status = ${}", params.len()));
        }
        if let Some(property_type) = self.property_type {
            params.push(property_type.as_str().to_string());
            conditions.push(format!("property_type = ${}", params.len()));
        }

        (conditions.join(" AND "), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawPropertySearch {
        let mut raw = RawPropertySearch::default();
        for (k, v) in pairs {
            let v = v.to_string();
            match *k {
                "query" => raw.query = Some(v),
                "status" => raw.status = Some(v),
                "property_type" => raw.property_type = Some(v),
                "limit" => raw.limit = Some(v),
                "offset" => raw.offset = Some(v),
                "sort_by" => raw.sort_by = Some(v),
                "sort_order" => raw.sort_order = Some(v),
                other => panic!("unknown param {}", other),
            }
        }
        raw
    }

    #[test]
    fn defaults_apply_when_params_absent() {
        let search = PropertySearch::parse(RawPropertySearch::default()).unwrap();
        assert_eq!(search.limit, 10);
        assert_eq!(search.offset, 0);
        assert_eq!(search.sort_by, SortField::CreatedAt);
        assert_eq!(search.sort_order, SortDirection::Desc);
        assert!(search.query.is_none());

        let sql = search.to_sql();
        assert_eq!(
            sql.sql,
            "SELECT * FROM properties WHERE is_deleted = false \
             ORDER BY created_at DESC LIMIT 10 OFFSET 0"
        );
        assert!(sql.params.is_empty());
    }

    #[test]
    fn unknown_sort_by_falls_back_instead_of_erroring() {
        let search = PropertySearch::parse(raw(&[("sort_by", "user_id; DROP TABLE")])).unwrap();
        assert_eq!(search.sort_by, SortField::CreatedAt);
    }

    #[test]
    fn all_filters_bind_positional_params() {
        let search = PropertySearch::parse(raw(&[
            ("query", "lake"),
            ("status", "for_sale"),
            ("property_type", "residential"),
            ("sort_by", "price"),
            ("sort_order", "ASC"),
            ("limit", "5"),
            ("offset", "15"),
        ]))
        .unwrap();

        let sql = search.to_sql();
        assert_eq!(sql.params, vec!["%lake%", "for_sale", "residential"]);
        assert!(sql.sql.contains("(title ILIKE $1 OR description ILIKE $1 OR street ILIKE $1 OR city ILIKE $1)"));
        assert!(sql.sql.contains("status = $2"));
        assert!(sql.sql.contains("property_type = $3"));
        assert!(sql.sql.ends_with("ORDER BY price ASC LIMIT 5 OFFSET 15"));
    }

    #[test]
    fn count_query_shares_predicates_without_pagination() {
        let search =
            PropertySearch::parse(raw(&[("status", "for_rent"), ("limit", "3")])).unwrap();
        let count = search.to_count_sql();
        assert_eq!(
            count.sql,
            "SELECT COUNT(*) as count FROM properties WHERE is_deleted = false AND status = $1"
        );
        assert_eq!(count.params, vec!["for_rent"]);
        assert!(!count.sql.contains("LIMIT"));
    }

    #[test]
    fn pagination_is_validated() {
        assert!(matches!(
            PropertySearch::parse(raw(&[("limit", "0")])),
            Err(FilterError::InvalidLimit(_))
        ));
        assert!(matches!(
            PropertySearch::parse(raw(&[("limit", "nope")])),
            Err(FilterError::InvalidLimit(_))
        ));
        assert!(matches!(
            PropertySearch::parse(raw(&[("offset", "-1")])),
            Err(FilterError::InvalidOffset(_))
        ));
    }

    #[test]
    fn limit_is_capped_at_configured_max() {
        let max = crate::config::config().api.max_page_size;
        let search = PropertySearch::parse(raw(&[("limit", "100000")])).unwrap();
        assert_eq!(search.limit, max);
    }

    #[test]
    fn sort_order_accepts_only_asc_and_desc() {
        let search = PropertySearch::parse(raw(&[("sort_order", "Asc")])).unwrap();
        assert_eq!(search.sort_order, SortDirection::Asc);
        let search = PropertySearch::parse(raw(&[("sort_order", "DESC")])).unwrap();
        assert_eq!(search.sort_order, SortDirection::Desc);
        assert!(matches!(
            PropertySearch::parse(raw(&[("sort_order", "sideways")])),
            Err(FilterError::InvalidSortOrder(_))
        ));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            PropertySearch::parse(raw(&[("status", "haunted")])),
            Err(FilterError::InvalidStatus(_))
        ));
    }
}
