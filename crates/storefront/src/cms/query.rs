//! Query builder for the CMS REST API.
//!
//! Serializes to the bracketed parameter grammar the CMS understands:
//! `populate=*`, `filters[slug][$eq]=x`, `sort=order:asc`,
//! `pagination[limit]=25`, `fields[0]=slug`.

use std::fmt;

/// Default page size when the caller does not set one.
pub const DEFAULT_LIMIT: u32 = 25;

/// Comparison operators accepted inside `filters[field][$op]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    ContainsI,
    StartsWith,
    EndsWith,
    Null,
    NotNull,
}

impl FilterOp {
    /// Operator as it appears in the query string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Contains => "$contains",
            Self::ContainsI => "$containsi",
            Self::StartsWith => "$startsWith",
            Self::EndsWith => "$endsWith",
            Self::Null => "$null",
            Self::NotNull => "$notNull",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `filters[field]=value`
    Equals { field: String, value: String },
    /// `filters[field][$op]=value`
    Operator {
        field: String,
        op: FilterOp,
        value: String,
    },
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Offset pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub start: Option<u32>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_LIMIT),
            start: None,
        }
    }
}

/// A `find` request against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindQuery {
    collection: String,
    filters: Vec<Filter>,
    populate: Option<String>,
    sort: Option<(String, SortOrder)>,
    pagination: Pagination,
    fields: Vec<String>,
}

impl FindQuery {
    /// Start a query that populates every relation and uses default paging.
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            populate: Some("*".to_string()),
            sort: None,
            pagination: Pagination::default(),
            fields: Vec::new(),
        }
    }

    /// Collection path segment.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Add an equality shorthand filter.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a filter with an explicit operator.
    #[must_use]
    pub fn filter_op(
        mut self,
        field: impl Into<String>,
        op: FilterOp,
        value: impl Into<String>,
    ) -> Self {
        self.filters.push(Filter::Operator {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    /// Replace the populate value. `None` omits the parameter.
    #[must_use]
    pub fn populate(mut self, populate: Option<&str>) -> Self {
        self.populate = populate.map(str::to_string);
        self
    }

    /// Sort by a single field.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    /// Set the page offset.
    #[must_use]
    pub const fn start(mut self, start: u32) -> Self {
        self.pagination.start = Some(start);
        self
    }

    /// Restrict the returned attributes.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Unencoded key/value pairs in wire order.
    ///
    /// Order: populate, filters, sort, pagination limit, pagination start,
    /// fields. A zero limit or start is omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(populate) = self.populate.as_deref().filter(|p| !p.is_empty()) {
            pairs.push(("populate".to_string(), populate.to_string()));
        }

        for filter in &self.filters {
            match filter {
                Filter::Equals { field, value } => {
                    pairs.push((format!("filters[{field}]"), value.clone()));
                }
                Filter::Operator { field, op, value } => {
                    pairs.push((format!("filters[{field}][{op}]"), value.clone()));
                }
            }
        }

        if let Some((field, order)) = &self.sort {
            pairs.push(("sort".to_string(), format!("{field}:{}", order.as_str())));
        }

        if let Some(limit) = self.pagination.limit.filter(|l| *l > 0) {
            pairs.push(("pagination[limit]".to_string(), limit.to_string()));
        }
        if let Some(start) = self.pagination.start.filter(|s| *s > 0) {
            pairs.push(("pagination[start]".to_string(), start.to_string()));
        }

        for (index, field) in self.fields.iter().enumerate() {
            pairs.push((format!("fields[{index}]"), field.clone()));
        }

        pairs
    }
}
