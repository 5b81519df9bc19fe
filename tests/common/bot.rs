//! Test bot process management.
//!
//! Spawns the slircbot binary with a generated configuration pointing at a
//! [`TestServer`](super::TestServer).

use std::process::{Child, Command, ExitStatus};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::sleep;

/// A running bot process. Killed on drop.
pub struct TestBot {
    child: Child,
    _dir: TempDir,
}

impl TestBot {
    /// Spawn a bot named `Bot` joining `#chan`, with `root` as global operator.
    pub fn spawn(port: u16) -> anyhow::Result<Self> {
        Self::spawn_with(port, "")
    }

    /// Spawn with extra TOML appended to the `[bot]` table.
    pub fn spawn_with(port: u16, extra_bot: &str) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("config.toml");
        let config_content = format!(
            r##"
[server]
host = "127.0.0.1"
port = {port}
connect_attempts = 3

[identity]
nick = "Bot"
username = "slircbot"
realname = "Test Bot"

[bot]
channels = ["#chan"]
operators = ["root"]
{extra_bot}

[reconnect]
enabled = false
"##
        );
        std::fs::write(&config_path, config_content)?;

        let child = Command::new(env!("CARGO_BIN_EXE_slircbot"))
            .arg(&config_path)
            .env("RUST_LOG", "slircbot=debug")
            .spawn()?;

        Ok(Self { child, _dir: dir })
    }

    /// Wait for the process to exit on its own.
    pub async fn wait_exit(&mut self, limit: Duration) -> anyhow::Result<ExitStatus> {
        let deadline = tokio::time::Instant::now() + limit;
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            if tokio::time::Instant::now() >= deadline {
                anyhow::bail!("bot did not exit within {:?}", limit);
            }
            sleep(Duration::from_millis(50)).await;
        }
    }
}

impl Drop for TestBot {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
