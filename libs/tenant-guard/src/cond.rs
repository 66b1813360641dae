use sea_orm::{
    ColumnTrait, Condition, EntityTrait,
    sea_query::{Alias, Expr},
};

use crate::TenantId;
use crate::binding::TableBinding;

/// Builds the tenant predicate `"<alias>"."<tenant_col>" = $n`.
///
/// The tenant id is always a bound parameter. Only the alias and column name
/// are rendered as identifiers, and both come from entity metadata.
pub fn tenant_condition<E>(binding: &TableBinding<E>, tenant_id: TenantId) -> Condition
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    let column = (Alias::new(binding.alias()), binding.tenant_col());
    Condition::all().add(Expr::col(column).eq(tenant_id.get()))
}

/// AND-combines the tenant predicate with caller filters.
///
/// The tenant predicate always comes first and is never dropped.
pub fn and_filters(tenant: &Condition, filters: &[Condition]) -> Condition {
    filters
        .iter()
        .cloned()
        .fold(Condition::all().add(tenant.clone()), Condition::add)
}
