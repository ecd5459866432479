use std::{sync::Arc, time::Duration};

use tokio::{
    io::{
        AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter,
    },
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
    sync::Mutex,
};

use crate::{Error, Result};

/// The longest inbound line accepted, terminator included.
pub const MAX_LINE_LEN: usize = 8191;

pub struct Connection<R, W> {
    reader: Reader<R>,
    writer: Writer<W>,
}

impl Connection<OwnedReadHalf, OwnedWriteHalf> {
    pub async fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let addr = format!("{host}:{port}");
        let stream = match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(Error::Connect { addr, source }),
            Err(..) => {
                return Err(Error::ConnectTimeout {
                    addr,
                    after: timeout,
                })
            }
        };

        let (read, write) = stream.into_split();
        Ok(Self::new(read, write))
    }
}

impl<R, W> Connection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(read: R, write: W) -> Self {
        Self {
            reader: Reader::new(read),
            writer: Writer::new(write),
        }
    }

    pub fn writer(&self) -> Writer<W> {
        self.writer.clone()
    }

    pub fn into_split(self) -> (Reader<R>, Writer<W>) {
        (self.reader, self.writer)
    }
}

pub struct Reader<R> {
    inner: BufReader<R>,
    buf: Vec<u8>,
}

impl<R> Reader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(read: R) -> Self {
        Self {
            inner: BufReader::new(read),
            buf: Vec::with_capacity(1024),
        }
    }

    /// Waits for the next full line, without its terminator.
    ///
    /// Returns `None` once the server closes the stream. Bytes that aren't
    /// valid UTF-8 are replaced rather than treated as an error. Lines longer
    /// than [`MAX_LINE_LEN`] are dropped.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            self.buf.clear();

            let n = (&mut self.inner)
                .take(MAX_LINE_LEN as u64)
                .read_until(b'\n', &mut self.buf)
                .await?;
            if n == 0 {
                return Ok(None);
            }

            // short of the limit without a newline is the end of the stream
            if self.buf.ends_with(b"\n") || n < MAX_LINE_LEN {
                break;
            }

            let skipped = n + self.skip_line().await?;
            log::warn!("dropped a line of {skipped} bytes, the limit is {MAX_LINE_LEN}");
        }

        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end_matches(['\r', '\n']);
        log::trace!("<- {}", line.escape_debug());
        Ok(Some(line.to_string()))
    }

    async fn skip_line(&mut self) -> Result<usize> {
        let mut skipped = 0;
        loop {
            let (found, used) = {
                let available = self.inner.fill_buf().await?;
                if available.is_empty() {
                    return Ok(skipped);
                }
                match available.iter().position(|&b| b == b'\n') {
                    Some(pos) => (true, pos + 1),
                    None => (false, available.len()),
                }
            };
            self.inner.consume(used);
            skipped += used;
            if found {
                return Ok(skipped);
            }
        }
    }
}

/// The write half, shared between the read loop and the keepalive.
///
/// Every line is written and flushed while holding the lock, so lines from
/// different writers never interleave.
pub struct Writer<W> {
    inner: Arc<Mutex<BufWriter<W>>>,
}

impl<W> Clone for Writer<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> Writer<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(write: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BufWriter::new(write))),
        }
    }

    pub async fn write_line(&self, line: impl std::fmt::Display) -> Result<()> {
        let mut line = line.to_string();
        line.truncate(line.trim_end_matches(['\r', '\n']).len());
        if line.contains(['\r', '\n']) {
            log::warn!("line breaks inside an outgoing line: {}", line.escape_debug());
            line = line.replace(['\r', '\n'], " ");
        }

        let mut inner = self.inner.lock().await;
        log::trace!("-> {}", line.escape_debug());
        inner.write_all(line.as_bytes()).await?;
        inner.write_all(b"\r\n").await?;
        inner.flush().await?;
        Ok(())
    }
}
