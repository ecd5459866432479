use aebot_core::config::LoadFromEnv as _;
use aebot_irc::config::Config;
use gumdrop::Options;

#[derive(Debug, gumdrop::Options)]
struct Args {
    /// prints the help message
    help: bool,

    /// server to connect to
    #[options(short = "s", meta = "<HOST>")]
    host: Option<String>,

    /// port to connect to
    #[options(meta = "<PORT>")]
    port: Option<u16>,

    /// nickname to use
    #[options(meta = "<NICK>")]
    nick: Option<String>,

    /// channel to join
    #[options(meta = "<CHANNEL>")]
    channel: Option<String>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        let Self {
            host,
            port,
            nick,
            channel,
            ..
        } = self;

        if let Some(host) = host {
            config.host = host
        }
        if let Some(port) = port {
            config.port = port
        }
        if let Some(nick) = nick {
            config.nickname = nick
        }
        if let Some(channel) = channel {
            config.channel = channel
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args_default_or_exit();

    simple_env_load::load_env_from([".env"]);
    alto_logger::TermLogger::new(
        alto_logger::Options::default()
            .with_time(alto_logger::TimeConfig::relative_now())
            .with_style(alto_logger::StyleConfig::SingleLine),
    )?
    .init()?;

    log::info!("loading configuration");
    let mut config = Config::load_from_env()?;
    args.apply(&mut config);

    match aebot_irc::create_bot(&config, aebot::dispatcher()).await {
        Ok(()) => log::info!("the session has ended"),
        Err(err) if err.is_connect() => {
            return Err(anyhow::Error::new(err).context("cannot start the bot"))
        }
        Err(err) => log::error!("the session has ended: {err}"),
    }

    Ok(())
}
