use std::fmt;

use sea_orm::{ColumnTrait, ColumnType, EntityTrait, IdenStatic};

use crate::error::ScopeError;

/// Table alias and tenant column resolved for an entity type.
///
/// The alias is what the generated SQL uses to qualify columns of the entity,
/// so the tenant predicate built from it stays correct when the caller adds
/// joins or filters on other tables.
#[derive(Clone, Debug)]
pub struct TableBinding<E: EntityTrait> {
    model: &'static str,
    schema: Option<String>,
    alias: String,
    tenant_col: E::Column,
}

impl<E> TableBinding<E>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// Resolve the binding of `E` with `tenant_col` as its tenant column.
    ///
    /// # Errors
    /// Returns `ScopeError::TableResolution` if the entity has no table name or
    /// the tenant column is not a 64-bit integer column.
    pub fn resolve(tenant_col: E::Column) -> Result<Self, ScopeError> {
        let model = model_name::<E>();
        let entity = E::default();

        let alias = entity.table_name().to_owned();
        if alias.is_empty() {
            return Err(ScopeError::TableResolution {
                model,
                reason: "entity has an empty table name".to_owned(),
            });
        }

        let column_type = tenant_col.def().get_column_type().clone();
        if !matches!(column_type, ColumnType::BigInteger) {
            return Err(ScopeError::TableResolution {
                model,
                reason: format!(
                    "tenant column `{}` on table `{alias}` must be a 64-bit integer, found {column_type:?}",
                    tenant_col.as_str()
                ),
            });
        }

        Ok(Self {
            model,
            schema: entity.schema_name().map(ToOwned::to_owned),
            alias,
            tenant_col,
        })
    }

    /// Type name of the model, used in logs and errors.
    #[must_use]
    pub fn model(&self) -> &'static str {
        self.model
    }

    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Name the query uses to refer to the entity's table.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[must_use]
    pub fn tenant_col(&self) -> E::Column {
        self.tenant_col
    }
}

impl<E: EntityTrait> fmt::Display for TableBinding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.alias),
            None => f.write_str(&self.alias),
        }
    }
}

/// Type name of the model behind `E`, e.g. `app::product::Model`.
#[must_use]
pub fn model_name<E: EntityTrait>() -> &'static str {
    std::any::type_name::<E::Model>()
}
