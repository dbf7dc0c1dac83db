#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::env;
use std::fs as std_fs;
use std::path::PathBuf;
use std::process::Stdio;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::process::Child;
use tokio::process::Command;
use tokio::time;
use uuid::Uuid;

use crate::domain::models::AudioClip;
use crate::domain::models::AudioPlayer;
use crate::domain::models::AudioRecorder;

fn spawn(command_line: &str, last_arg: &str) -> Result<Child> {
    let mut parts = command_line.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| return anyhow!("Audio command is empty"))?;

    let child = Command::new(program)
        .args(parts)
        .arg(last_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    return Ok(child);
}

async fn terminate(child: &mut Child) {
    if let Ok(Some(_)) = child.try_wait() {
        return;
    }

    if let Err(err) = child.kill().await {
        tracing::debug!(error = ?err, "Audio process was already gone");
    }
}

const RECORDER_GRACE: time::Duration = time::Duration::from_secs(2);

/// Asks the recorder to finish with SIGINT so it can finalize the WAV header,
/// then kills it if it has not exited within the grace period.
async fn interrupt(child: &mut Child) {
    if let Ok(Some(_)) = child.try_wait() {
        return;
    }

    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            let signalled = Command::new("kill")
                .arg("-INT")
                .arg(pid.to_string())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;

            match signalled {
                Ok(status) if status.success() => {
                    if let Ok(Ok(_)) = time::timeout(RECORDER_GRACE, child.wait()).await {
                        return;
                    }
                    tracing::warn!("Recorder ignored SIGINT, killing it");
                }
                Ok(status) => {
                    tracing::debug!(status = ?status, "Failed to signal recorder");
                }
                Err(err) => {
                    tracing::debug!(error = ?err, "Failed to signal recorder");
                }
            }
        }
    }

    terminate(child).await;
}

/// Records by running an external program that writes a WAV file to the path
/// given as its last argument, e.g. `arecord -f S16_LE -t wav`.
pub struct CommandRecorder {
    command: String,
    child: Option<Child>,
    output: Option<PathBuf>,
}

impl CommandRecorder {
    pub fn new(command: &str) -> CommandRecorder {
        return CommandRecorder {
            command: command.to_string(),
            child: None,
            output: None,
        };
    }

    fn remove_output(&mut self) {
        if let Some(path) = self.output.take() {
            if path.exists() {
                if let Err(err) = std_fs::remove_file(&path) {
                    tracing::warn!(error = ?err, path = ?path, "Failed to remove recording");
                }
            }
        }
    }
}

impl Drop for CommandRecorder {
    fn drop(&mut self) {
        self.remove_output();
    }
}

#[async_trait]
impl AudioRecorder for CommandRecorder {
    fn name(&self) -> &str {
        return "command";
    }

    #[allow(clippy::implicit_return)]
    async fn start(&mut self) -> Result<()> {
        if self.child.is_some() {
            bail!("A recording is already in progress");
        }

        let output = env::temp_dir().join(format!("desabafa-{}.wav", Uuid::new_v4()));
        let child = spawn(&self.command, &output.to_string_lossy())?;
        tracing::debug!(command = self.command.as_str(), output = ?output, "Recording started");

        self.child = Some(child);
        self.output = Some(output);

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn stop(&mut self) -> Result<AudioClip> {
        let mut child = self
            .child
            .take()
            .ok_or_else(|| return anyhow!("No recording in progress"))?;
        interrupt(&mut child).await;

        let output = self
            .output
            .clone()
            .ok_or_else(|| return anyhow!("Recording has no output file"))?;
        let res = fs::read(&output).await;
        self.remove_output();

        let bytes = res?;
        if bytes.is_empty() {
            bail!("Recording is empty");
        }
        tracing::debug!(bytes = bytes.len(), "Recording stopped");

        return Ok(AudioClip::wav(bytes));
    }

    #[allow(clippy::implicit_return)]
    async fn cancel(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            terminate(&mut child).await;
        }
        self.remove_output();

        return Ok(());
    }
}

/// Plays a clip by running an external program with the audio URL as its
/// last argument, e.g. `ffplay -nodisp -autoexit`.
pub struct CommandPlayer {
    command: String,
    child: Option<Child>,
}

impl CommandPlayer {
    pub fn new(command: &str) -> CommandPlayer {
        return CommandPlayer {
            command: command.to_string(),
            child: None,
        };
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    fn name(&self) -> &str {
        return "command";
    }

    #[allow(clippy::implicit_return)]
    async fn play(&mut self, url: &str) -> Result<()> {
        self.stop().await?;
        self.child = Some(spawn(&self.command, url)?);
        tracing::debug!(url = url, "Playback started");

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn stop(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            terminate(&mut child).await;
            tracing::debug!("Playback stopped");
        }

        return Ok(());
    }

    fn is_playing(&mut self) -> bool {
        let finished = match self.child.as_mut() {
            Some(child) => !matches!(child.try_wait(), Ok(None)),
            None => return false,
        };

        if finished {
            self.child = None;
            return false;
        }

        return true;
    }
}
