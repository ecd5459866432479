use std::sync::Arc;

/// The kinds of inbound lines the bot reacts to. Everything else is `Other`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Join,
    Part,
    ChannelMessage,
    Other,
}

impl Category {
    pub fn from_verb(verb: &str) -> Self {
        [
            ("JOIN", Self::Join),
            ("PART", Self::Part),
            ("PRIVMSG", Self::ChannelMessage),
        ]
        .into_iter()
        .find_map(|(name, category)| verb.eq_ignore_ascii_case(name).then_some(category))
        .unwrap_or(Self::Other)
    }
}

/// A classified inbound line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    category: Category,
    source: Option<Arc<str>>,
    payload: Option<Arc<str>>,
    raw: Arc<str>,
}

impl Event {
    pub fn new(category: Category, raw: &str) -> Self {
        Self {
            category,
            source: None,
            payload: None,
            raw: raw.into(),
        }
    }

    pub fn other(raw: &str) -> Self {
        Self::new(Category::Other, raw)
    }

    pub fn with_source(mut self, source: Option<&str>) -> Self {
        self.source = source.map(Arc::from);
        self
    }

    pub fn with_payload(mut self, payload: Option<&str>) -> Self {
        self.payload = payload.map(Arc::from);
        self
    }

    pub const fn category(&self) -> Category {
        self.category
    }

    /// The handle of the user the line came from, if the prefix named one.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The message text of a `ChannelMessage` addressed to the bot.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}
