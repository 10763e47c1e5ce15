//! Table-scoped read query: equality filters, one ordering column and
//! single-row mode, encoded as PostgREST query pairs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
    single: bool,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            order: None,
            single: false,
        }
    }

    /// Adds `column = value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), value.to_string()));
        self
    }

    pub fn order(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order = Some((column.into(), order));
        self
    }

    /// Expect exactly one row; anything else is a query error.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Query-string pairs in PostgREST form (`col=eq.value`, `order=col.asc`).
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        for (column, value) in &self.filters {
            pairs.push((column.clone(), format!("eq.{}", value)));
        }
        if let Some((column, order)) = &self.order {
            pairs.push(("order".to_string(), format!("{}.{}", column, order.as_str())));
        }
        pairs
    }
}
