//! Host for an external XTTS voice-cloning engine.
//!
//! The engine process is spawned once at startup and loads a pretrained
//! multilingual model onto the selected compute device. Synthesis calls are
//! forwarded to it and come back as in-memory WAV bytes.

mod device;
mod engine;
mod error;

pub use device::Device;
pub use engine::{EngineConfig, XttsEngine};
pub use error::{EngineError, Result};

use async_trait::async_trait;
use std::path::Path;

/// Voice-cloning speech synthesizer interface.
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Render `text` spoken in the voice of the `speaker_wav` sample,
    /// returning WAV bytes.
    async fn synthesize(
        &self,
        text: &str,
        speaker_wav: &Path,
        language: &str,
    ) -> Result<Vec<u8>>;
}

/// Check the startup precondition that the reference voice sample exists.
///
/// The server must refuse to start without it; the engine re-reads the file
/// on every synthesis call.
pub fn verify_voice_sample(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EngineError::MissingVoiceSample(path.to_path_buf()))
    }
}
