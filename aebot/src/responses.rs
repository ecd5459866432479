pub const PREFIX: &str = "!bot";

pub const YES: &str = "Yes?";
pub const NOT_UNDERSTOOD: &str = "How could I possibly understand that?";
pub const UNRECOGNIZED: &str = "That was not a recognized command. You fool!";

pub const SELF_ANNOUNCEMENT: &str = "Oh, my. You should be so happy. I'm here.";
pub const FAREWELL: &str = "Oh, shit. They decided to move onto more promising channels.";

pub fn welcome(handle: &str, channel: &str) -> String {
    format!("Greetings, {handle}, and welcome to hel...er, I mean, {channel}.")
}

pub fn time(time: &str, zone: &str) -> String {
    format!("The time is now {time} {zone}.")
}

pub fn uptime(elapsed: &str) -> String {
    format!("I've been here for {elapsed}.")
}

pub fn date(date: &str) -> String {
    format!("Today is {date}.")
}
