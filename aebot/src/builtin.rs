use aebot_core::prelude::*;

use crate::responses;

/// The handlers the bot runs with: greet on join, lament on part and
/// `!bot` commands on channel messages.
pub fn dispatcher() -> Dispatcher {
    Dispatcher::builder()
        .on(Category::Join, greet)
        .on(Category::Part, lament)
        .on(Category::ChannelMessage, command)
        .finish()
}

pub fn greet(event: &Event, ctx: &Context<'_>) -> Option<Outbound> {
    let identity = ctx.identity();
    let handle = event.source()?;

    let text = if identity.is_self(handle) {
        responses::SELF_ANNOUNCEMENT.to_string()
    } else {
        responses::welcome(handle, identity.channel())
    };
    Some(Outbound::privmsg(identity.channel(), text))
}

pub fn lament(_: &Event, ctx: &Context<'_>) -> Option<Outbound> {
    Some(Outbound::privmsg(
        ctx.identity().channel(),
        responses::FAREWELL,
    ))
}

/// Replies go to the channel even when the command came in privately.
pub fn command(event: &Event, ctx: &Context<'_>) -> Option<Outbound> {
    let reply = reply(event.payload()?, ctx)?;
    Some(Outbound::privmsg(ctx.identity().channel(), reply))
}

pub fn reply(payload: &str, ctx: &Context<'_>) -> Option<String> {
    let rest = payload.strip_prefix(responses::PREFIX)?;
    if rest.is_empty() {
        return Some(responses::YES.to_string());
    }

    // `!bottime` is `!bot time`
    let name = match rest.split_whitespace().next() {
        Some(name) => name.to_lowercase(),
        None => return Some(responses::NOT_UNDERSTOOD.to_string()),
    };

    match SubCommand::parse(&name) {
        Some(cmd) => cmd.run(ctx),
        None => Some(responses::UNRECOGNIZED.to_string()),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SubCommand {
    Weather,
    Time,
    Uptime,
    Date,
}

impl SubCommand {
    fn parse(name: &str) -> Option<Self> {
        let cmd = match name {
            "weather" => Self::Weather,
            "time" => Self::Time,
            "uptime" => Self::Uptime,
            "date" => Self::Date,
            _ => return None,
        };
        Some(cmd)
    }

    fn run(self, ctx: &Context<'_>) -> Option<String> {
        let now = ctx.now();
        let out = match self {
            // TODO needs a weather provider to ask
            Self::Weather => return None,
            Self::Time => now
                .format_time()
                .map(|time| responses::time(&time, now.zone())),
            Self::Uptime => Ok(responses::uptime(&ctx.uptime().as_readable_time())),
            Self::Date => now.format_date().map(|date| responses::date(&date)),
        };

        out.map_err(|err| log::warn!("cannot answer {:?}: {err}", self))
            .ok()
    }
}
