use crate::Identity;

/// A line the bot sends to the server.
///
/// `Display` renders the wire form without the line terminator; the transport
/// appends that when it writes the line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    User {
        username: String,
        invisible: bool,
        real_name: String,
    },
    Nick(String),
    Join(String),
    Ping(String),
    Pong(String),
    Privmsg {
        target: String,
        text: String,
    },
}

impl Outbound {
    /// The registration sequence: identity, nickname, then the channel join.
    pub fn handshake(identity: &Identity) -> [Self; 3] {
        [
            Self::User {
                username: identity.username().to_string(),
                invisible: identity.invisible(),
                real_name: identity.real_name().to_string(),
            },
            Self::Nick(identity.nickname().to_string()),
            Self::Join(identity.channel().to_string()),
        ]
    }

    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Privmsg {
            target: target.into(),
            text: text.into(),
        }
    }

    /// Where a `PRIVMSG` is headed.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Privmsg { target, .. } => Some(target),
            _ => None,
        }
    }

    /// The text of a `PRIVMSG`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Privmsg { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outbound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // RFC 2812 user mode bitmask: 8 asks for +i
            Self::User {
                username,
                invisible,
                real_name,
            } => {
                let mode = if *invisible { 8 } else { 0 };
                write!(f, "USER {username} {mode} * :{real_name}")
            }
            Self::Nick(nickname) => write!(f, "NICK {nickname}"),
            Self::Join(channel) => write!(f, "JOIN {channel}"),
            Self::Ping(token) => write!(f, "PING :{token}"),
            Self::Pong(token) => write!(f, "PONG :{token}"),
            Self::Privmsg { target, text } => write!(f, "PRIVMSG {target} :{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_order() {
        let identity = Identity::new("AEBOT", "#antieffortbot")
            .with_username("aebot")
            .with_real_name("An anti-effort bot!");

        let [user, nick, join] = Outbound::handshake(&identity);
        insta::assert_snapshot!(user.to_string(), @"USER aebot 0 * :An anti-effort bot!");
        insta::assert_snapshot!(nick.to_string(), @"NICK AEBOT");
        insta::assert_snapshot!(join.to_string(), @"JOIN #antieffortbot");
    }

    #[test]
    fn invisible_mode() {
        let identity = Identity::new("AEBOT", "#test").with_invisible(true);
        let [user, ..] = Outbound::handshake(&identity);
        insta::assert_snapshot!(user.to_string(), @"USER aebot 8 * :AEBOT");
    }

    #[test]
    fn keepalive_and_privmsg() {
        insta::assert_snapshot!(Outbound::Ping("irc.example.net".into()).to_string(), @"PING :irc.example.net");
        insta::assert_snapshot!(Outbound::Pong("12345".into()).to_string(), @"PONG :12345");

        let msg = Outbound::privmsg("#test", "Yes?");
        assert_eq!(msg.target(), Some("#test"));
        assert_eq!(msg.text(), Some("Yes?"));
        insta::assert_snapshot!(msg.to_string(), @"PRIVMSG #test :Yes?");

        assert_eq!(Outbound::Nick("AEBOT".into()).target(), None);
    }
}
