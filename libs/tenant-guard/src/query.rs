use std::fmt;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, DbBackend,
    EntityTrait, FromQueryResult, IdenStatic, IntoActiveModel, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, Select, Statement, sea_query::IntoCondition,
    sea_query::SimpleExpr,
};

use crate::TenantId;
use crate::binding::TableBinding;
use crate::cond::{and_filters, tenant_condition};
use crate::error::ScopeError;

/// Query handle restricted to a single tenant.
///
/// Returned by [`scope`](crate::scope). The tenant predicate is attached at
/// construction and no method removes or replaces it: filters are AND-combined
/// with it, and every execution method (select, insert, update, delete) runs
/// with it against the transaction the handle was created for.
///
/// # Example
/// ```rust,ignore
/// let mut product = product::ActiveModel::new();
/// let rows = tenant_guard::scope(&txn, tenant_id, &mut product)?
///     .filter(product::Column::Sku.starts_with("SKU-"))
///     .order_by_asc(product::Column::Sku)
///     .limit(20)
///     .all()
///     .await?;
/// ```
#[must_use]
pub struct TenantQuery<'txn, E: EntityTrait> {
    txn: &'txn DatabaseTransaction,
    tenant_id: TenantId,
    binding: TableBinding<E>,
    tenant_cond: Condition,
    filters: Vec<Condition>,
    order: Vec<(E::Column, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl<E: EntityTrait> fmt::Debug for TenantQuery<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantQuery")
            .field("tenant_id", &self.tenant_id)
            .field("table", &self.binding.alias())
            .field("filters", &self.filters.len())
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl<'txn, E> TenantQuery<'txn, E>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    pub(crate) fn new(
        txn: &'txn DatabaseTransaction,
        tenant_id: TenantId,
        binding: TableBinding<E>,
    ) -> Self {
        let tenant_cond = tenant_condition(&binding, tenant_id);
        Self {
            txn,
            tenant_id,
            binding,
            tenant_cond,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Resolved table alias and tenant column.
    #[must_use]
    pub fn table(&self) -> &TableBinding<E> {
        &self.binding
    }

    /// Effective predicate: the tenant condition AND every added filter.
    #[must_use]
    pub fn condition(&self) -> Condition {
        and_filters(&self.tenant_cond, &self.filters)
    }

    /// Add a filter. It is AND-combined with the tenant predicate.
    pub fn filter<F: IntoCondition>(mut self, filter: F) -> Self {
        self.filters.push(filter.into_condition());
        self
    }

    pub fn order_by(mut self, col: E::Column, order: Order) -> Self {
        self.order.push((col, order));
        self
    }

    pub fn order_by_asc(self, col: E::Column) -> Self {
        self.order_by(col, Order::Asc)
    }

    pub fn order_by_desc(self, col: E::Column) -> Self {
        self.order_by(col, Order::Desc)
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn select(&self) -> Select<E> {
        let mut select = E::find().filter(self.condition());
        for (col, order) in &self.order {
            select = select.order_by(*col, order.clone());
        }
        if let Some(limit) = self.limit {
            select = select.limit(limit);
        }
        if let Some(offset) = self.offset {
            select = select.offset(offset);
        }
        select
    }

    /// Build the SELECT statement for `backend` without executing it.
    #[must_use]
    pub fn build(&self, backend: DbBackend) -> Statement {
        self.select().build(backend)
    }

    /// Build the SELECT statement for the backend of the bound transaction.
    #[must_use]
    pub fn statement(&self) -> Statement {
        self.build(self.txn.get_database_backend())
    }

    /// Execute the query and return all matching rows of this tenant.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn all(self) -> Result<Vec<E::Model>, ScopeError> {
        Ok(self.select().all(self.txn).await?)
    }

    /// Execute the query and return at most one row of this tenant.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn one(self) -> Result<Option<E::Model>, ScopeError> {
        Ok(self.select().one(self.txn).await?)
    }

    /// Count the matching rows of this tenant.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn count(self) -> Result<u64, ScopeError>
    where
        E::Model: FromQueryResult + Send + Sync,
    {
        Ok(self.select().count(self.txn).await?)
    }

    /// Insert `am` into this tenant.
    ///
    /// The tenant column is overwritten with the handle's tenant first, so the
    /// row lands in this tenant whatever `am` carried.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the insert fails.
    pub async fn insert(self, mut am: E::ActiveModel) -> Result<E::Model, ScopeError>
    where
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: Send,
    {
        am.set(self.binding.tenant_col(), self.tenant_id.into());
        Ok(am.insert(self.txn).await?)
    }

    /// Update a single row identified by the primary key of `am`.
    ///
    /// The UPDATE carries the tenant predicate and any added filters, so a row
    /// owned by another tenant is never modified.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the update fails, including
    /// `DbErr::RecordNotUpdated` when no row of this tenant matched.
    pub async fn update(self, mut am: E::ActiveModel) -> Result<E::Model, ScopeError>
    where
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: Send,
    {
        am.set(self.binding.tenant_col(), self.tenant_id.into());
        let cond = self.condition();
        Ok(E::update(am).filter(cond).exec(self.txn).await?)
    }

    /// Update every row of this tenant matching the added filters.
    ///
    /// Returns the number of affected rows.
    ///
    /// # Errors
    /// - `ScopeError::Invalid` if `values` is empty or assigns the tenant column.
    /// - `ScopeError::Db` if the update fails.
    pub async fn update_many<I>(self, values: I) -> Result<u64, ScopeError>
    where
        I: IntoIterator<Item = (E::Column, SimpleExpr)>,
    {
        let tenant_col = self.binding.tenant_col();
        let mut update = E::update_many();
        let mut assigned = 0_usize;
        for (col, expr) in values {
            if col.as_str() == tenant_col.as_str() {
                return Err(ScopeError::Invalid(
                    "tenant column cannot be reassigned through a tenant-scoped update",
                ));
            }
            update = update.col_expr(col, expr);
            assigned += 1;
        }
        if assigned == 0 {
            return Err(ScopeError::Invalid("update requires at least one column"));
        }

        let result = update.filter(self.condition()).exec(self.txn).await?;
        Ok(result.rows_affected)
    }

    /// Delete every row of this tenant matching the added filters.
    ///
    /// Returns the number of deleted rows.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the delete fails.
    pub async fn delete_many(self) -> Result<u64, ScopeError> {
        let result = E::delete_many()
            .filter(self.condition())
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    /// **INSECURE**: unwrap the underlying `SeaORM` select.
    ///
    /// Only available with the `insecure-escape` feature. The returned select
    /// still carries the tenant predicate, but nothing prevents the caller from
    /// building an unscoped query from it.
    #[cfg(feature = "insecure-escape")]
    #[must_use]
    pub fn into_select(self) -> Select<E> {
        tracing::warn!(
            target: "security",
            table = %self.binding,
            tenant_id = %self.tenant_id,
            "TenantQuery::into_select() called - bypassing tenant query facade"
        );
        self.select()
    }
}
