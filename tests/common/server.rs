//! Fake IRC server.
//!
//! Listens on an ephemeral port and hands out a [`BotLink`] for each
//! connection the bot makes.

use slirc_line::InboundEvent;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A listening fake server.
pub struct TestServer {
    listener: TcpListener,
    port: u16,
}

impl TestServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the bot to connect.
    pub async fn accept(&self) -> anyhow::Result<BotLink> {
        let (stream, _) = timeout(Duration::from_secs(10), self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(BotLink {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }
}

/// The server side of one bot connection.
pub struct BotLink {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl BotLink {
    /// Send a raw line to the bot.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line from the bot, terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("bot closed the connection");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive one line and parse it.
    pub async fn recv_event(&mut self) -> anyhow::Result<InboundEvent> {
        let line = self.recv().await?;
        InboundEvent::parse(&line).map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive lines until one satisfies the predicate.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Receive one line and require it to equal `want`.
    pub async fn expect(&mut self, want: &str) -> anyhow::Result<()> {
        let got = self.recv().await?;
        anyhow::ensure!(got == want, "expected {want:?}, got {got:?}");
        Ok(())
    }

    /// Read the handshake, welcome the bot and consume its channel JOINs.
    pub async fn register(&mut self, nick: &str, channels: &[&str]) -> anyhow::Result<()> {
        self.expect(&format!("NICK {nick}")).await?;
        let user = self.recv_event().await?;
        anyhow::ensure!(user.verb == "USER", "expected USER, got {}", user.verb);

        self.send_raw(&format!(":irc.test 001 {nick} :Welcome to the Test Network"))
            .await?;
        for channel in channels {
            self.expect(&format!("JOIN {channel}")).await?;
        }
        self.send_raw(&format!(":irc.test 376 {nick} :End of /MOTD command."))
            .await?;
        Ok(())
    }

    /// Tell the bot it is in `channel` with the given member list.
    pub async fn names(&mut self, nick: &str, channel: &str, members: &str) -> anyhow::Result<()> {
        self.send_raw(&format!(":irc.test 353 {nick} = {channel} :{members}"))
            .await?;
        self.send_raw(&format!(":irc.test 366 {nick} {channel} :End of /NAMES list."))
            .await
    }

    /// Round-trip a PING so every earlier line has been handled.
    ///
    /// Fails if the bot sends anything other than the matching PONG first.
    pub async fn sync(&mut self) -> anyhow::Result<()> {
        self.send_raw("PING :sync").await?;
        self.expect("PONG sync").await
    }

    /// Wait for the bot to close the connection.
    pub async fn closed(&mut self) -> anyhow::Result<()> {
        loop {
            match self.recv().await {
                Ok(_) => continue,
                Err(e) if e.to_string().contains("closed") => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }
}
