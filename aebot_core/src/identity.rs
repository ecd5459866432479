/// Who the bot is on the network, and the one channel it sits in.
///
/// Built once before the session starts and shared behind an `Arc`; there is
/// no way to change it afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    nickname: Box<str>,
    username: Box<str>,
    real_name: Box<str>,
    invisible: bool,
    channel: Box<str>,
}

impl Identity {
    pub fn new(nickname: &str, channel: &str) -> Self {
        Self {
            nickname: nickname.into(),
            username: nickname.to_ascii_lowercase().into(),
            real_name: nickname.into(),
            invisible: false,
            channel: channel.into(),
        }
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_real_name(mut self, real_name: &str) -> Self {
        self.real_name = real_name.into();
        self
    }

    pub fn with_invisible(mut self, invisible: bool) -> Self {
        self.invisible = invisible;
        self
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn real_name(&self) -> &str {
        &self.real_name
    }

    pub const fn invisible(&self) -> bool {
        self.invisible
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Nicknames compare case-insensitively on IRC.
    pub fn is_self(&self, handle: &str) -> bool {
        self.nickname.eq_ignore_ascii_case(handle)
    }

    /// Whether a PRIVMSG target is addressed to us: our channel or our nickname.
    pub fn is_addressed_to(&self, target: &str) -> bool {
        self.channel.eq_ignore_ascii_case(target) || self.is_self(target)
    }
}
