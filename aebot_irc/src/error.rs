use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connecting to {addr} timed out after {after:?}")]
    ConnectTimeout { addr: String, after: Duration },

    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),

    #[error("the server closed the link: {0}")]
    Server(String),
}

impl Error {
    /// The transport never opened, so there was no session to end.
    pub const fn is_connect(&self) -> bool {
        matches!(self, Self::Connect { .. } | Self::ConnectTimeout { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
