use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Direction name in Firestore structured queries
    pub fn as_firestore(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASCENDING",
            SortDirection::Desc => "DESCENDING",
        }
    }
}

/// Equality filter on a top-level field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// The small query surface the API needs: AND-ed equality filters,
/// at most one ordering, optional limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_filters_in_order() {
        let q = Query::new()
            .where_eq("approved", true)
            .where_eq("userId", "u1")
            .order_by("createdAt", SortDirection::Desc)
            .limit(10);

        assert_eq!(q.filters.len(), 2);
        assert_eq!(q.filters[0].field, "approved");
        assert_eq!(q.filters[1].value, json!("u1"));
        assert_eq!(q.order_by.as_ref().map(|o| o.direction), Some(SortDirection::Desc));
        assert_eq!(q.limit, Some(10));
    }
}
