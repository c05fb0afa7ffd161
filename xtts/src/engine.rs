//! Client for a spawned XTTS `tts-server` engine process.

use crate::{Device, EngineError, Result, SpeechModel};
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// How the external engine process is launched.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Named pretrained model the engine loads at startup.
    pub model_name: String,
    /// Loopback port the engine listens on.
    pub port: u16,
    /// Compute device; `None` autodetects.
    pub device: Option<Device>,
    /// How long to wait for the engine to finish loading the model.
    /// The first run can take minutes while weights download.
    pub startup_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_name: "tts_models/multilingual/multi-dataset/xtts_v2".into(),
            port: 5102,
            device: None,
            startup_timeout: Duration::from_secs(300),
        }
    }
}

/// Handle to a running XTTS engine.
///
/// When the engine was spawned by this handle, dropping it terminates the
/// engine process.
pub struct XttsEngine {
    base_url: String,
    client: Client,
    child: Option<Child>,
    device: Device,
}

impl XttsEngine {
    /// Launch the engine process and wait until it is ready to synthesize.
    ///
    /// The engine loads the configured model exactly once here; requests
    /// reuse the same process for the lifetime of the handle.
    pub async fn spawn(config: &EngineConfig) -> Result<Self> {
        let device = config.device.unwrap_or_else(Device::detect);
        info!(%device, model = %config.model_name, "launching XTTS engine");

        let mut cmd = Command::new("tts-server");
        cmd.arg("--model_name")
            .arg(&config.model_name)
            .arg("--port")
            .arg(config.port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if device.use_cuda() {
            cmd.arg("--use_cuda").arg("true");
        }
        let child = cmd.spawn()?;

        let engine = Self {
            base_url: format!("http://127.0.0.1:{}", config.port),
            client: Client::new(),
            child: Some(child),
            device,
        };
        engine.wait_ready(config.startup_timeout).await?;
        info!("XTTS engine ready");
        Ok(engine)
    }

    /// Attach to an engine that is already listening on `base_url`.
    pub fn connect(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
            child: None,
            device: Device::detect(),
        }
    }

    /// Device the engine was asked to run on.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Whether this handle owns the engine process.
    pub fn owns_process(&self) -> bool {
        self.child.is_some()
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(resp) = self.client.get(&self.base_url).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(EngineError::NotReady(timeout));
            }
            sleep(Duration::from_millis(500)).await;
        }
    }
}

#[async_trait]
impl SpeechModel for XttsEngine {
    async fn synthesize(
        &self,
        text: &str,
        speaker_wav: &Path,
        language: &str,
    ) -> Result<Vec<u8>> {
        let url = format!("{}/api/tts", self.base_url);
        let speaker = speaker_wav.to_string_lossy();
        debug!(%text, %language, "requesting synthesis");
        let resp = self
            .client
            .get(&url)
            // style_wav is always present, empty when unused
            .query(&[
                ("text", text),
                ("speaker_wav", speaker.as_ref()),
                ("language_id", language),
                ("style_wav", ""),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(EngineError::Synthesis { status, detail });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}
