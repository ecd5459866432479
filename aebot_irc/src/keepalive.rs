use std::time::Duration;

use aebot_core::message::Outbound;
use tokio::{
    io::AsyncWrite,
    time::{Instant, MissedTickBehavior},
};

use crate::{connection::Writer, Result};

pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Sends `PING :<host>` on a fixed interval for as long as the writer works.
pub struct Keepalive<W> {
    writer: Writer<W>,
    host: String,
    interval: Duration,
    last_sent: Option<Instant>,
}

impl<W> Keepalive<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: Writer<W>, host: &str, interval: Duration) -> Self {
        Self {
            writer,
            host: host.to_string(),
            interval,
            last_sent: None,
        }
    }

    /// The first signal goes out immediately. Returns the error of the first
    /// write that fails.
    pub async fn run(mut self) -> Result<()> {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let now = interval.tick().await;
            if let Some(last) = self.last_sent {
                log::trace!("last keepalive was {:?} ago", now - last);
            }

            if let Err(err) = self.writer.write_line(Outbound::Ping(self.host.clone())).await {
                log::warn!("stopping the keepalive: {err}");
                return Err(err);
            }
            self.last_sent = Some(now);
        }
    }
}
