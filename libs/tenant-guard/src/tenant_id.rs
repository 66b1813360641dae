use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use sea_orm::Value;

/// Opaque identifier of a tenant.
///
/// Any `i64` is accepted, including zero and negative values. Authenticating
/// the tenant identity is the caller's job; the guard only enforces that a
/// query is restricted to the identifier it was given.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TenantId(i64);

impl TenantId {
    #[inline]
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TenantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<TenantId> for i64 {
    fn from(id: TenantId) -> Self {
        id.0
    }
}

// Bound as a query parameter, never rendered into SQL text.
impl From<TenantId> for Value {
    fn from(id: TenantId) -> Self {
        Value::BigInt(Some(id.0))
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}
