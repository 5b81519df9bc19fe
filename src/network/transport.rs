//! Framed line transport to the IRC server.

use crate::error::ConnectError;
use futures_util::{SinkExt, StreamExt};
use slirc_line::{LineCodec, Outbound, ProtocolError};
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, lookup_host};
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

/// A line-framed byte stream. Generic so tests can run over in-memory pipes.
pub struct Transport<S = TcpStream> {
    framed: Framed<S, LineCodec>,
}

impl Transport<TcpStream> {
    /// Connect to `host:port`, trying up to `attempts` times back to back.
    ///
    /// A name that resolves to no address at all fails immediately.
    pub async fn connect(host: &str, port: u16, attempts: u32) -> Result<Self, ConnectError> {
        let mut last_error = None;

        for attempt in 1..=attempts {
            info!(host = %host, port, attempt, "Connecting");

            let addrs: Vec<SocketAddr> = match lookup_host((host, port)).await {
                Ok(addrs) => addrs.collect(),
                Err(e) => {
                    warn!(host = %host, attempt, error = %e, "Lookup failed");
                    last_error = Some(e);
                    continue;
                }
            };
            if addrs.is_empty() {
                return Err(ConnectError::Resolve {
                    host: host.to_string(),
                    port,
                });
            }

            match TcpStream::connect(&addrs[..]).await {
                Ok(stream) => {
                    let peer = stream.peer_addr().ok();
                    info!(host = %host, port, ?peer, "Connected");
                    return Ok(Self::new(stream));
                }
                Err(e) => {
                    warn!(host = %host, port, attempt, error = %e, "Connect failed");
                    last_error = Some(e);
                }
            }
        }

        Err(ConnectError::Exhausted {
            host: host.to_string(),
            port,
            attempts,
            source: last_error.unwrap_or_else(|| io::Error::other("no connection attempts made")),
        })
    }
}

impl<S> Transport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an established stream.
    pub fn new(stream: S) -> Self {
        Self {
            framed: Framed::new(stream, LineCodec::new()),
        }
    }

    /// Write one line and flush it.
    pub async fn send_line(&mut self, line: &Outbound) -> Result<(), ProtocolError> {
        self.framed.send(line.to_string()).await
    }

    /// Next inbound line, or `None` once the peer has closed the stream.
    pub async fn next_line(&mut self) -> Option<Result<String, ProtocolError>> {
        self.framed.next().await
    }

    /// Flush and shut the stream down. Errors are logged, not returned.
    pub async fn close(mut self) {
        if let Err(e) = SinkExt::<String>::flush(&mut self.framed).await {
            debug!(error = %e, "Flush on close failed");
        }
        let mut stream = self.framed.into_inner();
        match stream.shutdown().await {
            Ok(()) => debug!("Transport closed"),
            Err(e) => debug!(error = %e, "Shutdown failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_send_and_receive_lines() {
        let (client, server) = tokio::io::duplex(1024);
        let mut transport = Transport::new(client);
        let (read_half, mut write_half) = tokio::io::split(server);

        transport.send_line(&Outbound::Nick("Bot".into())).await.unwrap();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        assert_eq!(line, "NICK Bot\r\n");

        write_half.write_all(b"PING :abc\r\nERROR :bye").await.unwrap();
        write_half.shutdown().await.unwrap();
        assert_eq!(transport.next_line().await.unwrap().unwrap(), "PING :abc");
        assert_eq!(transport.next_line().await.unwrap().unwrap(), "ERROR :bye");
        assert!(transport.next_line().await.is_none());
    }

    #[tokio::test]
    async fn test_close_shuts_down_write_side() {
        let (client, mut server) = tokio::io::duplex(1024);
        let transport = Transport::new(client);
        transport.close().await;

        let mut buf = Vec::new();
        server.read_to_end(&mut buf).await.unwrap();
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_connect_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let accept = tokio::spawn(async move { listener.accept().await.map(|_| ()) });

        let transport = Transport::connect("127.0.0.1", port, 1).await;
        assert!(transport.is_ok());
        accept.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_connect_exhausts_attempts() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = Transport::connect("127.0.0.1", port, 3).await.err().unwrap();
        match err {
            ConnectError::Exhausted { attempts, port: p, .. } => {
                assert_eq!(attempts, 3);
                assert_eq!(p, port);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
