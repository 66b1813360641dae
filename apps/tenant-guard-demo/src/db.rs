use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection};

use crate::config::DatabaseConfig;

/// Open the connection pool described by `cfg`.
///
/// # Errors
/// Returns an error if the database cannot be reached.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.dsn.clone());
    opts.max_connections(cfg.max_conns)
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {}", redact_dsn(&cfg.dsn)))?;

    tracing::info!(
        engine = db_engine(&db),
        dsn = %redact_dsn(&cfg.dsn),
        "database connected"
    );
    Ok(db)
}

/// Return database engine identifier for tracing / logging.
#[must_use]
pub fn db_engine(db: &DatabaseConnection) -> &'static str {
    match db.get_database_backend() {
        DatabaseBackend::Postgres => "postgres",
        DatabaseBackend::MySql => "mysql",
        DatabaseBackend::Sqlite => "sqlite",
    }
}

/// Query parameters whose value is a credential.
const SECRET_PARAMS: &[&str] = &["password", "pass", "pwd"];

/// Redact credentials from DSN for logging: the userinfo password and any
/// password-like query parameter become `***`.
#[must_use]
pub fn redact_dsn(dsn: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(dsn) else {
        return if dsn.contains('@') || dsn.contains("password") {
            "***".to_owned()
        } else {
            dsn.to_owned()
        };
    };

    if parsed.password().is_some() {
        let _ = parsed.set_password(Some("***"));
    }

    let has_secret_param = parsed
        .query_pairs()
        .any(|(key, _)| SECRET_PARAMS.contains(&key.to_ascii_lowercase().as_str()));
    if has_secret_param {
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(key, value)| {
                let value = if SECRET_PARAMS.contains(&key.to_ascii_lowercase().as_str()) {
                    "***".to_owned()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        parsed.query_pairs_mut().clear().extend_pairs(pairs);
    }

    parsed.to_string()
}
