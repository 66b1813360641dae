use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityName};

use crate::binding::{TableBinding, model_name};
use crate::error::ScopeError;
use crate::query::TenantQuery;
use crate::{TenantEntity, TenantId};

/// Create a query restricted to `tenant_id` for the model's table.
///
/// Steps, in order:
/// 1. Reject models whose entity declares no tenant column.
/// 2. Resolve the table alias and validate the tenant column.
/// 3. Overwrite the model's tenant column with `tenant_id`.
/// 4. Attach `"<alias>"."tenant_id" = $n` to a query bound to `txn`.
///
/// Failures happen before step 3, so an error never leaves `model` modified.
/// No I/O is performed; the returned handle runs its queries on `txn` when
/// the caller executes it. `txn` is never committed or rolled back here.
///
/// # Errors
/// - `ScopeError::NotTenanted` if the entity is declared global.
/// - `ScopeError::TableResolution` if the table alias or tenant column cannot
///   be resolved.
pub fn scope<'txn, A>(
    txn: &'txn DatabaseTransaction,
    tenant_id: TenantId,
    model: &mut A,
) -> Result<TenantQuery<'txn, A::Entity>, ScopeError>
where
    A: ActiveModelTrait,
    A::Entity: TenantEntity,
{
    let Some(tenant_col) = <A::Entity as TenantEntity>::tenant_col() else {
        let model = model_name::<A::Entity>();
        let table = A::Entity::default().table_name().to_owned();
        tracing::warn!(
            target: "security",
            model,
            table = %table,
            tenant_id = %tenant_id,
            "refusing tenant-scoped query for a model without tenant column"
        );
        return Err(ScopeError::NotTenanted { model, table });
    };

    let binding = TableBinding::<A::Entity>::resolve(tenant_col)?;

    model.set(tenant_col, tenant_id.into());

    tracing::debug!(
        model = binding.model(),
        table = %binding,
        tenant_id = %tenant_id,
        "tenant-scoped query created"
    );
    Ok(TenantQuery::new(txn, tenant_id, binding))
}

/// Scope a query for entity `E` without a caller-held model instance.
///
/// Equivalent to [`scope`] with a fresh, empty active model. Useful for
/// reads and bulk updates/deletes where no row is being written.
///
/// # Errors
/// Same as [`scope`].
pub fn scope_entity<E>(
    txn: &DatabaseTransaction,
    tenant_id: TenantId,
) -> Result<TenantQuery<'_, E>, ScopeError>
where
    E: TenantEntity,
{
    let mut model = <E::ActiveModel as ActiveModelTrait>::default();
    scope(txn, tenant_id, &mut model)
}

/// Binds tenant-scoped queries to a transaction.
pub trait TenantScopeExt {
    /// Method form of [`scope`].
    ///
    /// # Errors
    /// Same as [`scope`].
    fn tenant_scoped<A>(
        &self,
        tenant_id: TenantId,
        model: &mut A,
    ) -> Result<TenantQuery<'_, A::Entity>, ScopeError>
    where
        A: ActiveModelTrait,
        A::Entity: TenantEntity;
}

impl TenantScopeExt for DatabaseTransaction {
    fn tenant_scoped<A>(
        &self,
        tenant_id: TenantId,
        model: &mut A,
    ) -> Result<TenantQuery<'_, A::Entity>, ScopeError>
    where
        A: ActiveModelTrait,
        A::Entity: TenantEntity,
    {
        scope(self, tenant_id, model)
    }
}
