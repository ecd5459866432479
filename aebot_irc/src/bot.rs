use std::{sync::Arc, time::Duration};

use aebot_core::prelude::{Category, Context, Dispatcher, Event, Identity, Outbound, Uptime};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    connection::{Connection, Reader, Writer},
    keepalive::{Keepalive, KEEPALIVE_INTERVAL},
    parser::{self, Control},
    Error, Result,
};

pub struct Session<R, W> {
    conn: Connection<R, W>,
    identity: Arc<Identity>,
    dispatcher: Dispatcher,
    host: String,
    keepalive: Duration,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(
        conn: Connection<R, W>,
        identity: Arc<Identity>,
        dispatcher: Dispatcher,
        host: &str,
    ) -> Self {
        Self {
            conn,
            identity,
            dispatcher,
            host: host.to_string(),
            keepalive: KEEPALIVE_INTERVAL,
        }
    }

    pub fn with_keepalive(mut self, interval: Duration) -> Self {
        self.keepalive = interval;
        self
    }

    /// Registers, joins the channel, then handles lines until the server
    /// closes the stream.
    pub async fn run(self) -> Result<()> {
        let Self {
            conn,
            identity,
            dispatcher,
            host,
            keepalive,
        } = self;

        let uptime = Uptime::start();
        let (mut reader, writer) = conn.into_split();

        log::info!(
            "registering as {} and joining {}",
            identity.nickname(),
            identity.channel()
        );
        for line in Outbound::handshake(&identity) {
            writer.write_line(line).await?;
        }

        let keepalive = tokio::spawn(Keepalive::new(writer.clone(), &host, keepalive).run());

        let read_loop = ReadLoop {
            identity: &identity,
            dispatcher: &dispatcher,
            writer: &writer,
            uptime,
        };
        let res = read_loop.run(&mut reader).await;

        keepalive.abort();
        res
    }
}

struct ReadLoop<'a, W> {
    identity: &'a Identity,
    dispatcher: &'a Dispatcher,
    writer: &'a Writer<W>,
    uptime: Uptime,
}

impl<'a, W> ReadLoop<'a, W>
where
    W: AsyncWrite + Unpin,
{
    async fn run<R>(self, reader: &mut Reader<R>) -> Result<()>
    where
        R: AsyncRead + Unpin,
    {
        while let Some(line) = reader.read_line().await? {
            match parser::control(&line) {
                Some(Control::Ping(token)) => {
                    self.writer.write_line(Outbound::Pong(token.to_string())).await?
                }
                Some(Control::Error(reason)) => return Err(Error::Server(reason.to_string())),
                None => {}
            }

            let event = parser::classify(&line, self.identity);
            self.observe(&event);

            let ctx = Context::capture(self.identity, &self.uptime);
            if let Some(out) = self.dispatcher.dispatch(&event, &ctx) {
                self.writer.write_line(out).await?;
            }
        }

        log::info!("the server closed the connection");
        Ok(())
    }

    fn observe(&self, event: &Event) {
        match (event.category(), event.source(), event.payload()) {
            (Category::ChannelMessage, Some(source), Some(payload)) => {
                log::debug!("{source}: {payload}")
            }
            (Category::Join | Category::Part, Some(source), _) => {
                log::debug!("{:?}: {source}", event.category())
            }
            (category, ..) => log::debug!("{category:?}: {}", event.raw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{
        AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf,
    };

    use super::*;

    type TestSession = Session<ReadHalf<DuplexStream>, WriteHalf<DuplexStream>>;

    fn echo(event: &Event, ctx: &Context<'_>) -> Option<Outbound> {
        let text = format!("{:?} {}", event.category(), event.payload().unwrap_or_default());
        Some(Outbound::privmsg(ctx.identity().channel(), text))
    }

    fn session(client: DuplexStream) -> TestSession {
        let dispatcher = Dispatcher::builder()
            .on(Category::Join, echo)
            .on(Category::ChannelMessage, echo)
            .finish();

        let (read, write) = tokio::io::split(client);
        Session::new(
            Connection::new(read, write),
            Arc::new(Identity::new("AEBOT", "#test")),
            dispatcher,
            "irc.example.net",
        )
        .with_keepalive(Duration::from_secs(3600))
    }

    struct Server {
        lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
        write: WriteHalf<DuplexStream>,
    }

    impl Server {
        fn new(stream: DuplexStream) -> Self {
            let (read, write) = tokio::io::split(stream);
            Self {
                lines: BufReader::new(read).lines(),
                write,
            }
        }

        async fn send(&mut self, line: &str) {
            self.write.write_all(line.as_bytes()).await.unwrap();
            self.write.write_all(b"\r\n").await.unwrap();
        }

        // skips the keepalive
        async fn recv(&mut self) -> String {
            loop {
                let line = self.lines.next_line().await.unwrap().unwrap();
                if line != "PING :irc.example.net" {
                    return line;
                }
            }
        }
    }

    #[tokio::test]
    async fn handshake_then_dispatch_then_eof() {
        let (client, server) = tokio::io::duplex(4096);
        let task = tokio::spawn(session(client).run());
        let mut server = Server::new(server);

        let handshake = [
            server.lines.next_line().await.unwrap().unwrap(),
            server.lines.next_line().await.unwrap().unwrap(),
            server.lines.next_line().await.unwrap().unwrap(),
        ];
        insta::assert_snapshot!(handshake.join("\n"), @r###"
        USER aebot 0 * :AEBOT
        NICK AEBOT
        JOIN #test
        "###);

        server.send(":alice!a@host JOIN #test").await;
        assert_eq!(server.recv().await, "PRIVMSG #test :Join ");

        drop(server);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn events_are_handled_in_order() {
        let (client, server) = tokio::io::duplex(4096);
        let task = tokio::spawn(session(client).run());
        let mut server = Server::new(server);
        for _ in 0..3 {
            server.recv().await;
        }

        for i in 0..10 {
            server.send(&format!(":alice!a@host PRIVMSG #test :{i}")).await;
        }
        for i in 0..10 {
            assert_eq!(server.recv().await, format!("PRIVMSG #test :ChannelMessage {i}"));
        }

        drop(server);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn malformed_lines_do_not_stop_the_loop() {
        let (client, server) = tokio::io::duplex(4096);
        let task = tokio::spawn(session(client).run());
        let mut server = Server::new(server);
        for _ in 0..3 {
            server.recv().await;
        }

        for line in ["", "garbage", "   ", ":only-a-prefix", ":a!b@c PART #test"] {
            server.send(line).await;
        }
        server.send(":alice!a@host PRIVMSG #test :still here").await;
        assert_eq!(server.recv().await, "PRIVMSG #test :ChannelMessage still here");

        drop(server);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn answers_server_pings() {
        let (client, server) = tokio::io::duplex(4096);
        let task = tokio::spawn(session(client).run());
        let mut server = Server::new(server);
        for _ in 0..3 {
            server.recv().await;
        }

        server.send("PING :1234abcd").await;
        assert_eq!(server.recv().await, "PONG :1234abcd");

        drop(server);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn server_error_ends_the_session() {
        let (client, server) = tokio::io::duplex(4096);
        let task = tokio::spawn(session(client).run());
        let mut server = Server::new(server);
        for _ in 0..3 {
            server.recv().await;
        }

        server.send("ERROR :Closing Link: AEBOT (Ping timeout)").await;
        match task.await.unwrap() {
            Err(Error::Server(reason)) => assert_eq!(reason, "Closing Link: AEBOT (Ping timeout)"),
            res => panic!("unexpected: {res:?}"),
        }
    }

    // the read and write sides on separate pipes, so the server can hang up
    // on one while still talking on the other
    fn split_session(
        dispatcher: Dispatcher,
        keepalive: Duration,
    ) -> (Session<DuplexStream, DuplexStream>, Server) {
        let (read, server_write) = tokio::io::duplex(4096);
        let (write, server_read) = tokio::io::duplex(4096);
        let session = Session::new(
            Connection::new(read, write),
            Arc::new(Identity::new("AEBOT", "#test")),
            dispatcher,
            "irc.example.net",
        )
        .with_keepalive(keepalive);

        let (_, server_write) = tokio::io::split(server_write);
        let (server_read, _) = tokio::io::split(server_read);
        let server = Server {
            lines: BufReader::new(server_read).lines(),
            write: server_write,
        };
        (session, server)
    }

    #[tokio::test(start_paused = true)]
    async fn failed_keepalive_leaves_the_read_loop_running() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let seen = move |event: &Event, _: &Context<'_>| -> Option<Outbound> {
            let _ = tx.send(event.payload().unwrap_or_default().to_string());
            None
        };
        let dispatcher = Dispatcher::builder()
            .on(Category::ChannelMessage, seen)
            .finish();

        let interval = Duration::from_secs(15);
        let (session, mut server) = split_session(dispatcher, interval);
        let task = tokio::spawn(session.run());

        for _ in 0..3 {
            server.recv().await;
        }
        let Server { lines, mut write } = server;
        drop(lines);

        // the next pings have nowhere to go
        tokio::time::sleep(interval * 3).await;

        for msg in ["one", "two"] {
            let line = format!(":alice!a@host PRIVMSG #test :{msg}\r\n");
            write.write_all(line.as_bytes()).await.unwrap();
            assert_eq!(rx.recv().await.as_deref(), Some(msg));
        }

        drop(write);
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn failed_reply_ends_the_session() {
        let dispatcher = Dispatcher::builder().on(Category::Join, echo).finish();
        let (session, mut server) = split_session(dispatcher, Duration::from_secs(3600));
        let task = tokio::spawn(session.run());

        for _ in 0..3 {
            server.recv().await;
        }
        let Server { lines, mut write } = server;
        drop(lines);

        write.write_all(b":alice!a@host JOIN #test\r\n").await.unwrap();
        match task.await.unwrap() {
            Err(Error::Io(..)) => {}
            res => panic!("unexpected: {res:?}"),
        }
    }
}
