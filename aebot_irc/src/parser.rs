use aebot_core::{
    event::{Category, Event},
    Identity,
};

/// Lines the server sends without a prefix that the read loop answers itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control<'a> {
    Ping(&'a str),
    Error(&'a str),
}

/// Classifies a raw line by its second whitespace-delimited token.
///
/// Lines too short to have one are `Other`.
pub fn classify(line: &str, identity: &Identity) -> Event {
    let line = line.trim_end_matches(['\r', '\n']);

    let mut rest = line;
    let (prefix, verb) = match (token(&mut rest), token(&mut rest)) {
        (Some(prefix), Some(verb)) => (prefix, verb),
        _ => return Event::other(line),
    };

    match Category::from_verb(verb) {
        category @ (Category::Join | Category::Part) => {
            Event::new(category, line).with_source(source(prefix))
        }
        category @ Category::ChannelMessage => Event::new(category, line)
            .with_source(source(prefix))
            .with_payload(payload(rest, identity)),
        Category::Other => Event::other(line),
    }
}

pub fn control(line: &str) -> Option<Control<'_>> {
    let mut rest = line.trim_end_matches(['\r', '\n']);
    let head = token(&mut rest)?;

    let rest = rest.trim_start();
    let arg = rest.strip_prefix(':').unwrap_or(rest);

    match head {
        head if head.eq_ignore_ascii_case("PING") => Some(Control::Ping(arg)),
        head if head.eq_ignore_ascii_case("ERROR") => Some(Control::Error(arg)),
        _ => None,
    }
}

fn token<'a>(input: &mut &'a str) -> Option<&'a str> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    let end = trimmed
        .find(char::is_whitespace)
        .unwrap_or(trimmed.len());
    let (head, tail) = trimmed.split_at(end);
    *input = tail;
    Some(head)
}

// `:nick!user@host` -> `nick`
fn source(prefix: &str) -> Option<&str> {
    prefix
        .strip_prefix(':')?
        .split_terminator('!')
        .next()
        .filter(|s| !s.is_empty())
}

// `<target> :<text>`, only when the target is our channel or our nickname
fn payload<'a>(mut rest: &'a str, identity: &Identity) -> Option<&'a str> {
    let target = token(&mut rest)?;
    if !identity.is_addressed_to(target) {
        return None;
    }
    rest.trim_start().strip_prefix(':')
}
