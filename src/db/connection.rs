use crate::config::DatabaseConfig;
use postgres::{Client, NoTls};
use tracing::{debug, error};

/// Opens a fresh connection to the conversation store.
///
/// There is no pooling: every query opens its own connection and drops it
/// when done. Returns `None` on failure; the caller degrades to an empty
/// result.
pub fn connect(config: &DatabaseConfig) -> Option<Client> {
    debug!(
        "connecting to {}@{}:{}/{}",
        config.user, config.host, config.port, config.name
    );

    let result = postgres::Config::new()
        .host(&config.host)
        .port(config.port)
        .dbname(&config.name)
        .user(&config.user)
        .password(&config.password)
        .connect(NoTls);

    match result {
        Ok(client) => Some(client),
        Err(e) => {
            error!(
                "failed to connect to {}@{}:{}/{}: {}",
                config.user, config.host, config.port, config.name, e
            );
            None
        }
    }
}
