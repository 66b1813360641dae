/// Errors that can occur while scoping or executing a tenant query.
///
/// Any of these means the query cannot be safely executed for the tenant.
/// Callers should abort the enclosing operation instead of falling back to an
/// unscoped query.
#[derive(thiserror::Error, Debug)]
pub enum ScopeError {
    /// The model type declares no tenant column.
    #[error(
        "cannot use {model} (table `{table}`) in a tenant-scoped query: model does not belong to a single tenant"
    )]
    NotTenanted { model: &'static str, table: String },

    /// The table alias or tenant column of the model could not be resolved.
    #[error("cannot resolve table for {model}: {reason}")]
    TableResolution { model: &'static str, reason: String },

    /// Requested composition would break the tenant restriction.
    #[error("invalid tenant query: {0}")]
    Invalid(&'static str),

    /// Database error occurred during query execution.
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

impl ScopeError {
    /// Name of the model type the error refers to, when known.
    #[must_use]
    pub fn model(&self) -> Option<&'static str> {
        match self {
            Self::NotTenanted { model, .. } | Self::TableResolution { model, .. } => Some(*model),
            Self::Invalid(_) | Self::Db(_) => None,
        }
    }
}
