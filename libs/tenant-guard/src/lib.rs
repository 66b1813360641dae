//! Tenant-scoped query guard for `SeaORM`.
//!
//! Every query created through this crate is restricted to exactly one tenant.
//! The guard refuses entities that do not belong to a tenant, stamps the tenant
//! identifier onto the model being written, and attaches a parameterized
//! `"<table>"."tenant_id" = $n` predicate that the returned handle cannot drop.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sea_orm::{entity::prelude::*, TransactionTrait};
//! use tenant_guard::{TenantEntity, TenantId, TenantScopeExt};
//!
//! #[derive(Clone, Debug, PartialEq, DeriveEntityModel, TenantEntity)]
//! #[sea_orm(table_name = "product")]
//! #[tenant(col = "tenant_id")]
//! pub struct Model {
//!     #[sea_orm(primary_key)]
//!     pub product_id: i64,
//!     pub tenant_id: i64,
//!     pub sku: String,
//! }
//!
//! let txn = db.begin().await?;
//! let mut product = ActiveModel {
//!     sku: Set("SKU-1".to_owned()),
//!     ..Default::default()
//! };
//! let inserted = txn
//!     .tenant_scoped(TenantId::new(7), &mut product)?
//!     .insert(product.clone())
//!     .await?;
//! assert_eq!(inserted.tenant_id, 7);
//! txn.commit().await?;
//! ```
//!
//! # Policy
//!
//! | Entity declares | `scope` result |
//! |-----------------|----------------|
//! | `#[tenant(col = "...")]` | handle filtered by that column |
//! | `#[tenant(global)]` | `ScopeError::NotTenanted` |
//! | tenant column not `BIGINT` | `ScopeError::TableResolution` |

mod binding;
mod cond;
mod entity_traits;
mod error;
mod guard;
mod query;
mod tenant_id;

pub use binding::{TableBinding, model_name};
pub use entity_traits::TenantEntity;
pub use error::ScopeError;
pub use guard::{TenantScopeExt, scope, scope_entity};
pub use query::TenantQuery;
pub use tenant_id::TenantId;

// Re-export the derive macro when the feature is enabled
#[cfg(feature = "macros")]
pub use tenant_guard_macros::TenantEntity;
