use sea_orm::EntityTrait;

/// Declares whether an entity belongs to a single tenant.
///
/// Every entity that may be passed to the guard must implement this trait and
/// make an explicit decision: either name the column holding the tenant
/// identifier, or declare the entity global. Nothing is inferred from field
/// names.
///
/// The tenant column must be a 64-bit integer column (`i64` on the model).
///
/// # Example (Manual Implementation)
/// ```rust,ignore
/// impl TenantEntity for product::Entity {
///     fn tenant_col() -> Option<Self::Column> {
///         Some(product::Column::TenantId)
///     }
/// }
/// ```
///
/// # Example (Using Derive Macro)
/// ```rust,ignore
/// use tenant_guard::TenantEntity;
///
/// #[derive(Clone, Debug, PartialEq, DeriveEntityModel, TenantEntity)]
/// #[sea_orm(table_name = "product")]
/// #[tenant(col = "tenant_id")]
/// pub struct Model {
///     #[sea_orm(primary_key)]
///     pub product_id: i64,
///     pub tenant_id: i64,
///     pub sku: String,
/// }
/// ```
///
/// # Global Entities
/// ```rust,ignore
/// // A tenant record does not belong to itself.
/// #[derive(Clone, Debug, PartialEq, DeriveEntityModel, TenantEntity)]
/// #[sea_orm(table_name = "tenant")]
/// #[tenant(global)]
/// pub struct Model {
///     #[sea_orm(primary_key)]
///     pub tenant_id: i64,
///     pub name: String,
/// }
/// ```
pub trait TenantEntity: EntityTrait {
    /// Set by `#[tenant(global)]`. When true, `tenant_col()` returns `None`.
    const IS_GLOBAL: bool = false;

    /// Returns the column that stores the tenant identifier.
    ///
    /// - Tenanted entities: `Some(Column::TenantId)`
    /// - Global entities: `None`, and the guard refuses to scope them
    fn tenant_col() -> Option<Self::Column>;

    /// Whether this entity can be scoped to a single tenant.
    #[must_use]
    fn is_tenanted() -> bool {
        Self::tenant_col().is_some()
    }
}
