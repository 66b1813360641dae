//! Subcommand implementations. Every tenant-owned access goes through
//! `tenant_guard`; only the global `tenant` table is touched directly.

use anyhow::{Context, Result, bail};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, TransactionTrait,
};
use tenant_guard::{TenantId, TenantScopeExt, scope_entity};

use crate::schema::{self, product, tenant};

/// Create the demo tables.
///
/// # Errors
/// Returns an error if a table cannot be created.
pub async fn init_schema(db: &DatabaseConnection) -> Result<()> {
    schema::create_tables(db).await?;
    tracing::info!("schema initialized");
    Ok(())
}

/// Register a tenant and return its generated id.
///
/// # Errors
/// Returns an error if the insert fails.
pub async fn add_tenant(db: &DatabaseConnection, name: &str) -> Result<TenantId> {
    let model = tenant::ActiveModel {
        name: Set(name.to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .with_context(|| format!("failed to add tenant `{name}`"))?;

    let id = TenantId::new(model.tenant_id);
    tracing::info!(tenant_id = %id, name, "tenant added");
    Ok(id)
}

/// Add a product owned by `tenant_id`.
///
/// # Errors
/// Returns an error if the tenant does not exist or the insert fails.
pub async fn add_product(
    db: &DatabaseConnection,
    tenant_id: TenantId,
    sku: &str,
    description: Option<&str>,
) -> Result<product::Model> {
    let txn = db.begin().await?;
    let created = add_product_in(&txn, tenant_id, sku, description).await?;
    txn.commit().await?;

    tracing::info!(tenant_id = %tenant_id, sku, product_id = created.product_id, "product added");
    Ok(created)
}

/// Add a product inside a caller-owned transaction. The tenant lookup and the
/// insert see the same snapshot.
///
/// # Errors
/// Returns an error if the tenant does not exist or the insert fails.
pub async fn add_product_in(
    txn: &DatabaseTransaction,
    tenant_id: TenantId,
    sku: &str,
    description: Option<&str>,
) -> Result<product::Model> {
    ensure_tenant(txn, tenant_id).await?;

    let mut model = product::ActiveModel {
        sku: Set(sku.to_owned()),
        description: Set(description.map(str::to_owned)),
        ..Default::default()
    };
    txn.tenant_scoped(tenant_id, &mut model)?
        .insert(model)
        .await
        .with_context(|| format!("failed to add product `{sku}`"))
}

/// List the products of `tenant_id`, ordered by SKU.
///
/// # Errors
/// Returns an error if the query fails.
pub async fn list_products(
    db: &DatabaseConnection,
    tenant_id: TenantId,
    sku_prefix: Option<&str>,
    limit: Option<u64>,
) -> Result<Vec<product::Model>> {
    let txn = db.begin().await?;
    let mut query = scope_entity::<product::Entity>(&txn, tenant_id)?
        .order_by_asc(product::Column::Sku);
    if let Some(prefix) = sku_prefix {
        query = query.filter(product::Column::Sku.starts_with(prefix));
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    tracing::debug!(sql = %query.statement(), "listing products");

    let rows = query.all().await?;
    txn.commit().await?;
    Ok(rows)
}

/// Delete a product of `tenant_id` by SKU. Returns whether a row was removed.
///
/// # Errors
/// Returns an error if the delete fails.
pub async fn delete_product(db: &DatabaseConnection, tenant_id: TenantId, sku: &str) -> Result<bool> {
    let txn = db.begin().await?;
    let deleted = scope_entity::<product::Entity>(&txn, tenant_id)?
        .filter(product::Column::Sku.eq(sku))
        .delete_many()
        .await?;
    txn.commit().await?;

    if deleted == 0 {
        tracing::warn!(tenant_id = %tenant_id, sku, "no such product for tenant");
    } else {
        tracing::info!(tenant_id = %tenant_id, sku, "product deleted");
    }
    Ok(deleted > 0)
}

async fn ensure_tenant(txn: &DatabaseTransaction, tenant_id: TenantId) -> Result<()> {
    if tenant::Entity::find_by_id(tenant_id.get())
        .one(txn)
        .await?
        .is_none()
    {
        bail!("tenant {tenant_id} does not exist");
    }
    Ok(())
}
