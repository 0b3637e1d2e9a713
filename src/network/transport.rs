//! Server connection and line framing.
//!
//! [`connect`] opens TCP (optionally wrapped in TLS) and [`Connection::split`]
//! turns it into an inbound line stream plus a writer task fed by an mpsc
//! queue. Framing errors are scoped to one line: overlong lines are dropped,
//! invalid UTF-8 is decoded lossily, and only I/O errors or EOF end the
//! stream.

use super::tls;
use crate::config::ServerConfig;
use crate::error::TransportError;
use bytes::BytesMut;
use futures_util::{SinkExt, Stream, stream};
use slirc_wire::{LineCodec, Message, ProtocolError};
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::codec::{Decoder, FramedWrite};
use tracing::{debug, info, trace, warn};

/// Any bidirectional byte stream the bot can talk over.
pub trait Io: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> Io for T {}

/// Inbound lines with terminators stripped.
pub type LineStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// An established server connection.
pub struct Connection {
    io: Box<dyn Io>,
    max_line_len: usize,
}

/// Open a connection to `server`.
pub async fn connect(
    server: &ServerConfig,
    max_line_len: usize,
) -> Result<Connection, TransportError> {
    info!(host = %server.host, port = server.port, tls = server.tls, "Connecting");
    let tcp = TcpStream::connect(server.address()).await?;
    tcp.set_nodelay(true)?;

    if !server.tls {
        return Ok(Connection::new(tcp, max_line_len));
    }

    let connector = tls::connector(server.verify_cert)?;
    let name = tls::server_name(&server.host)?;
    let stream = connector.connect(name, tcp).await?;
    info!(host = %server.host, verify = server.verify_cert, "TLS handshake completed");

    Ok(Connection::new(stream, max_line_len))
}

impl Connection {
    /// Wrap an already-connected stream.
    pub fn new(io: impl Io + 'static, max_line_len: usize) -> Self {
        Self {
            io: Box::new(io),
            max_line_len,
        }
    }

    /// Split into an inbound line stream and a writer task.
    ///
    /// The writer drains `outbound` until every sender is dropped or a write
    /// fails.
    pub fn split(self, outbound: mpsc::Receiver<Message>) -> (LineStream, JoinHandle<()>) {
        let (reader, writer) = tokio::io::split(self.io);
        let lines = read_lines(reader, LineCodec::with_max_len(self.max_line_len));
        let sink = FramedWrite::new(writer, LineCodec::with_max_len(self.max_line_len));
        let writer = tokio::spawn(write_messages(sink, outbound));
        (lines, writer)
    }
}

struct Reader {
    io: ReadHalf<Box<dyn Io>>,
    codec: LineCodec,
    buf: BytesMut,
}

impl Reader {
    async fn next_line(&mut self) -> Option<String> {
        loop {
            match self.codec.decode(&mut self.buf) {
                Ok(Some(line)) => return Some(line),
                Ok(None) => {}
                Err(ProtocolError::InvalidUtf8 { raw_line, byte_pos }) => {
                    debug!(byte_pos, "Invalid UTF-8 in line, decoding lossily");
                    return Some(String::from_utf8_lossy(&raw_line).into_owned());
                }
                Err(ProtocolError::LineTooLong { actual, limit }) => {
                    warn!(actual, limit, "Dropping overlong line");
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, "Read failed");
                    return None;
                }
            }

            match self.io.read_buf(&mut self.buf).await {
                Ok(0) => {
                    info!("Server closed the connection");
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Read failed");
                    return None;
                }
            }
        }
    }
}

fn read_lines(io: ReadHalf<Box<dyn Io>>, codec: LineCodec) -> LineStream {
    let reader = Reader {
        io,
        codec,
        buf: BytesMut::with_capacity(4096),
    };
    Box::pin(stream::unfold(reader, |mut reader| async move {
        let line = reader.next_line().await?;
        trace!(line = %line, "<-");
        Some((line, reader))
    }))
}

async fn write_messages<W>(mut sink: FramedWrite<W, LineCodec>, mut outbound: mpsc::Receiver<Message>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(msg) = outbound.recv().await {
        let line = msg.to_string();
        trace!(line = %line, "->");
        if let Err(e) = sink.send(line).await {
            warn!(error = %e, "Write failed");
            return;
        }
    }
    debug!("Outbound queue closed, writer exiting");
}
