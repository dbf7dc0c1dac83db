#[cfg(test)]
#[path = "audio_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::AudioClip;
use crate::domain::models::AudioPlayerBox;
use crate::domain::models::AudioRecorderBox;
use crate::domain::models::BackendBox;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
}

/// Owns the capture and playback devices. At most one recording and one clip
/// are active at any time, and every error path hands the device back.
pub struct AudioAdapter {
    recorder: AudioRecorderBox,
    player: AudioPlayerBox,
    state: RecorderState,
    now_playing: Option<String>,
}

impl AudioAdapter {
    pub fn new(recorder: AudioRecorderBox, player: AudioPlayerBox) -> AudioAdapter {
        return AudioAdapter {
            recorder,
            player,
            state: RecorderState::Idle,
            now_playing: None,
        };
    }

    pub fn recorder_state(&self) -> RecorderState {
        return self.state;
    }

    pub fn now_playing(&self) -> Option<&str> {
        return self.now_playing.as_deref();
    }

    pub async fn start_recording(&mut self) -> Result<()> {
        if self.state == RecorderState::Recording {
            bail!("A recording is already in progress");
        }

        if let Err(err) = self.recorder.start().await {
            tracing::error!(error = ?err, recorder = self.recorder.name(), "Failed to start recording");
            self.release_recorder().await;
            return Err(err);
        }

        self.state = RecorderState::Recording;
        return Ok(());
    }

    pub async fn stop_recording(&mut self) -> Result<AudioClip> {
        if self.state == RecorderState::Idle {
            bail!("No recording in progress");
        }
        self.state = RecorderState::Idle;

        match self.recorder.stop().await {
            Ok(clip) => return Ok(clip),
            Err(err) => {
                tracing::error!(error = ?err, "Failed to stop recording");
                self.release_recorder().await;
                return Err(err);
            }
        }
    }

    pub async fn cancel_recording(&mut self) {
        if self.state == RecorderState::Idle {
            return;
        }

        self.state = RecorderState::Idle;
        self.release_recorder().await;
    }

    async fn release_recorder(&mut self) {
        if let Err(err) = self.recorder.cancel().await {
            tracing::warn!(error = ?err, "Failed to release recorder");
        }
    }

    /// Plays a clip, stopping whatever was playing before.
    pub async fn play(&mut self, url: &str) -> Result<()> {
        self.stop_playback().await?;
        self.player.play(url).await?;
        self.now_playing = Some(url.to_string());

        return Ok(());
    }

    pub async fn stop_playback(&mut self) -> Result<()> {
        if self.now_playing.take().is_some() {
            self.player.stop().await?;
        }

        return Ok(());
    }

    /// Notices a clip that ended on its own. Returns true when playback just
    /// went back to idle.
    pub fn poll_playback(&mut self) -> bool {
        if self.now_playing.is_some() && !self.player.is_playing() {
            self.now_playing = None;
            return true;
        }

        return false;
    }
}

/// Uploads a clip for transcription. Failures and blank transcripts are
/// logged and dropped.
pub async fn transcribe(backend: &BackendBox, session_id: i64, clip: AudioClip) -> Option<String> {
    if clip.is_empty() {
        tracing::warn!("Skipping transcription of an empty clip");
        return None;
    }

    match backend.speech_to_text(session_id, clip).await {
        Ok(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                tracing::warn!(session_id, "Transcription came back empty");
                return None;
            }

            return Some(text);
        }
        Err(err) => {
            tracing::error!(error = ?err, session_id, "Failed to transcribe audio");
            return None;
        }
    }
}
