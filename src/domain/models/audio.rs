use anyhow::Result;
use async_trait::async_trait;

/// A finished voice recording, ready to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: String,
}

impl AudioClip {
    pub fn wav(bytes: Vec<u8>) -> AudioClip {
        return AudioClip {
            bytes,
            file_name: "audio.wav".to_string(),
            mime: "audio/wav".to_string(),
        };
    }

    pub fn is_empty(&self) -> bool {
        return self.bytes.is_empty();
    }
}

/// Exclusive access to a capture device. Implementations must release the
/// device on `stop`, and when dropped mid-recording.
#[async_trait]
pub trait AudioRecorder {
    fn name(&self) -> &str;

    async fn start(&mut self) -> Result<()>;

    async fn stop(&mut self) -> Result<AudioClip>;

    /// Releases the device and throws away anything captured so far.
    async fn cancel(&mut self) -> Result<()>;
}

#[async_trait]
pub trait AudioPlayer {
    fn name(&self) -> &str;

    async fn play(&mut self, url: &str) -> Result<()>;

    async fn stop(&mut self) -> Result<()>;

    /// True while a clip is still being played. A clip reaching its end
    /// flips this back to false.
    fn is_playing(&mut self) -> bool;
}

pub type AudioRecorderBox = Box<dyn AudioRecorder + Send + Sync>;
pub type AudioPlayerBox = Box<dyn AudioPlayer + Send + Sync>;
