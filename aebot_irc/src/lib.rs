use std::sync::Arc;

use aebot_core::dispatch::Dispatcher;

pub mod config;
pub mod connection;
pub mod parser;

mod bot;
pub use bot::Session;

mod error;
pub use error::{Error, Result};

mod keepalive;
pub use keepalive::{Keepalive, KEEPALIVE_INTERVAL};

use config::Config;
use connection::Connection;

/// Opens the connection and runs the session on it until the server hangs up.
pub async fn create_bot(config: &Config, dispatcher: Dispatcher) -> Result<()> {
    log::info!(
        "connecting to {} (with name {})",
        config.address(),
        config.nickname
    );
    let conn = Connection::connect(&config.host, config.port, config.connect_timeout).await?;
    log::info!("connected");

    let identity = Arc::new(config.identity());
    log::info!("starting the irc bot");
    Session::new(conn, identity, dispatcher, &config.host)
        .with_keepalive(config.keepalive_interval)
        .run()
        .await
}
