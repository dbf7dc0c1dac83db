#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::AudioClip;
use crate::domain::models::AudioPlayer;
use crate::domain::models::AudioRecorder;

#[derive(Default)]
pub struct NoopRecorder {}

#[async_trait]
impl AudioRecorder for NoopRecorder {
    fn name(&self) -> &str {
        return "none";
    }

    #[allow(clippy::implicit_return)]
    async fn start(&mut self) -> Result<()> {
        bail!("Gravação de áudio não configurada. Defina 'recorder' no arquivo de configuração.");
    }

    #[allow(clippy::implicit_return)]
    async fn stop(&mut self) -> Result<AudioClip> {
        bail!("Gravação de áudio não configurada.");
    }

    #[allow(clippy::implicit_return)]
    async fn cancel(&mut self) -> Result<()> {
        return Ok(());
    }
}

#[derive(Default)]
pub struct NoopPlayer {}

#[async_trait]
impl AudioPlayer for NoopPlayer {
    fn name(&self) -> &str {
        return "none";
    }

    #[allow(clippy::implicit_return)]
    async fn play(&mut self, _url: &str) -> Result<()> {
        bail!("Reprodução de áudio não configurada. Defina 'player' no arquivo de configuração.");
    }

    #[allow(clippy::implicit_return)]
    async fn stop(&mut self) -> Result<()> {
        return Ok(());
    }

    fn is_playing(&mut self) -> bool {
        return false;
    }
}
