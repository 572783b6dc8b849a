use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

/// One page of results together with pagination bookkeeping.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}

/// Shared query plumbing for every list endpoint: filter, order, paginate,
/// count. Parameterized per entity instead of being duplicated per resource.
pub struct QueryBuilder<E: EntityTrait> {
    query: Select<E>,
    page: u64,
    per_page: u64,
}

impl<E: EntityTrait> QueryBuilder<E> {
    pub fn new() -> Self {
        Self::from_query(E::find())
    }

    /// Starts from a preconstructed select (e.g. with relations applied).
    pub fn from_query(query: Select<E>) -> Self {
        Self {
            query,
            page: 1,
            per_page: 20,
        }
    }

    /// Sets the page window. Both values are floored at 1; the HTTP layer
    /// caps `per_page` at the configured maximum before it reaches here.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.max(1);
        self
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.query = self.query.filter(condition);
        self
    }

    pub fn order_by<C>(mut self, column: C, desc: bool) -> Self
    where
        C: ColumnTrait,
    {
        self.query = if desc {
            self.query.order_by_desc(column)
        } else {
            self.query.order_by_asc(column)
        };
        self
    }

    /// Executes the query, counting the filtered total before fetching the
    /// requested window.
    pub async fn execute<C>(self, db: &C) -> Result<Page<E::Model>, sea_orm::DbErr>
    where
        C: ConnectionTrait,
        E::Model: FromQueryResult + Send + Sync,
    {
        let total = self.query.clone().count(db).await?;

        let items = self
            .query
            .limit(self.per_page)
            .offset((self.page - 1) * self.per_page)
            .all(db)
            .await?;

        Ok(Page {
            items,
            total,
            page: self.page,
            per_page: self.per_page,
        })
    }
}

impl<E: EntityTrait> Default for QueryBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for building text search conditions across a set of columns.
pub struct SearchBuilder {
    condition: Condition,
    has_terms: bool,
}

impl SearchBuilder {
    pub fn new() -> Self {
        Self {
            condition: Condition::any(),
            has_terms: false,
        }
    }

    /// Adds a LIKE condition for the column unless the term is blank.
    pub fn add_like<C: ColumnTrait>(mut self, column: C, term: &str) -> Self {
        let term = term.trim();
        if !term.is_empty() {
            self.condition = self.condition.add(column.contains(term));
            self.has_terms = true;
        }
        self
    }

    /// Returns the assembled condition, or `None` when no term was added.
    pub fn build(self) -> Option<Condition> {
        self.has_terms.then_some(self.condition)
    }
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
