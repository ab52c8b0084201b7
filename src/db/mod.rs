use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connections kept for a server database. Every cascade holds one
/// connection for its whole transaction, so a handful is plenty.
const SERVER_MAX_CONNECTIONS: u32 = 10;

/// Pool settings for `database_url`.
///
/// `SQLite` gets a single connection: it allows one writer at a time, and an
/// in-memory database exists only inside the connection that created it.
#[must_use]
pub fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opts = ConnectOptions::new(database_url);

    if database_url.starts_with("sqlite:") {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(SERVER_MAX_CONNECTIONS).min_connections(1);
    }

    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);
    opts
}

/// Open the pool described by [`connect_options`].
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn connect(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let opts = connect_options(database_url);
    let max_connections = opts.get_max_connections();
    let db = Database::connect(opts).await?;
    tracing::debug!(?max_connections, "Database pool ready");
    Ok(db)
}
