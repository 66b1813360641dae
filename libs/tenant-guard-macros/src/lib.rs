// Proc-macro crate for tenant-guard derives
//
//! # tenant-guard-macros
//!
//! ## `#[derive(TenantEntity)]`
//!
//! Implements `tenant_guard::TenantEntity` for the `Entity` generated next to
//! a `SeaORM` `Model`.
//!
//! **IMPORTANT**: The tenant decision must be explicit. No implicit defaults.
//!
//! ### Example
//!
//! ```ignore
//! use sea_orm::entity::prelude::*;
//! use tenant_guard::TenantEntity;
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
//! ```
//!
//! ### Attributes
//!
//! Exactly one of:
//! - `col = "column_name"`: the entity belongs to a single tenant
//! - `global`: the entity is shared by all tenants and cannot be scoped

use proc_macro::TokenStream;
use proc_macro_error2::{abort, proc_macro_error};
use syn::{DeriveInput, parse_macro_input};

mod tenant_entity;

/// Derive macro for implementing `TenantEntity`.
///
/// Place this on your `SeaORM` Model struct along with a `#[tenant(...)]`
/// attribute.
///
/// # Attributes
///
/// - `col = "column_name"` - Column holding the tenant identifier (`i64`)
/// - `global` - Entity is not tenant-owned; the guard rejects it
///
/// # Global Entities
///
/// ```ignore
/// #[derive(DeriveEntityModel, TenantEntity)]
/// #[sea_orm(table_name = "tenant")]
/// #[tenant(global)]
/// pub struct Model {
///     #[sea_orm(primary_key)]
///     pub tenant_id: i64,
///     pub name: String,
/// }
/// ```
#[proc_macro_derive(TenantEntity, attributes(tenant))]
#[proc_macro_error]
pub fn derive_tenant_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match tenant_entity::expand_derive_tenant_entity(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => abort!(err.span(), "{}", err),
    }
}
