use std::time::Duration;

use aebot_core::{
    config::{load_from_env, parse, parse_flag, LoadFromEnv},
    Identity,
};

use crate::keepalive::KEEPALIVE_INTERVAL;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub nickname: String,
    pub username: String,
    pub real_name: String,
    pub invisible: bool,
    pub channel: String,
    pub connect_timeout: Duration,
    pub keepalive_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::from("avarice.az.us.synirc.net"),
            port: 6666,
            nickname: String::from("AEBOT"),
            username: String::from("aebot"),
            real_name: String::from("An anti-effort bot!"),
            invisible: false,
            channel: String::from("#antieffortbot"),
            connect_timeout: Duration::from_secs(10),
            keepalive_interval: KEEPALIVE_INTERVAL,
        }
    }
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn identity(&self) -> Identity {
        Identity::new(&self.nickname, &self.channel)
            .with_username(&self.username)
            .with_real_name(&self.real_name)
            .with_invisible(self.invisible)
    }
}

impl LoadFromEnv for Config {
    fn load_from_env() -> anyhow::Result<Self> {
        load_from_env(&[
            ("AEBOT_HOST", |t, v| {
                t.host = v;
                Ok(())
            }),
            ("AEBOT_PORT", |t, v| {
                t.port = parse(&v)?;
                Ok(())
            }),
            ("AEBOT_NICKNAME", |t, v| {
                t.nickname = v;
                Ok(())
            }),
            ("AEBOT_USERNAME", |t, v| {
                t.username = v;
                Ok(())
            }),
            ("AEBOT_REAL_NAME", |t, v| {
                t.real_name = v;
                Ok(())
            }),
            ("AEBOT_INVISIBLE", |t, v| {
                t.invisible = parse_flag(&v)?;
                Ok(())
            }),
            ("AEBOT_CHANNEL", |t, v| {
                t.channel = v;
                Ok(())
            }),
            ("AEBOT_CONNECT_TIMEOUT", |t, v| {
                t.connect_timeout = Duration::from_secs(parse(&v)?);
                Ok(())
            }),
            ("AEBOT_KEEPALIVE_INTERVAL", |t, v| {
                t.keepalive_interval = Duration::from_secs(parse(&v)?);
                Ok(())
            }),
        ])
    }
}
