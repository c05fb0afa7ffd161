use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use synth_server::{app, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;
use xtts::{verify_voice_sample, Device, EngineConfig, XttsEngine};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Address to bind the HTTP server
    #[arg(long, env = "SYNTH_ADDR", default_value = "0.0.0.0:5002")]
    addr: SocketAddr,
    /// Reference voice sample used for cloning
    #[arg(long, env = "SYNTH_VOICE", default_value = "my_voice.wav")]
    voice: PathBuf,
    /// Language the cloned voice speaks
    #[arg(long, env = "SYNTH_LANGUAGE", default_value = "en")]
    language: String,
    /// Pretrained model the engine loads
    #[arg(
        long,
        env = "SYNTH_MODEL",
        default_value = "tts_models/multilingual/multi-dataset/xtts_v2"
    )]
    model_name: String,
    /// Loopback port for the engine process
    #[arg(long, env = "SYNTH_ENGINE_PORT", default_value_t = 5102)]
    engine_port: u16,
    /// Force a compute device instead of autodetecting
    #[arg(long, value_enum)]
    device: Option<DeviceArg>,
    /// Seconds to wait for the engine to load its model
    #[arg(long, default_value_t = 300)]
    startup_timeout: u64,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DeviceArg {
    Cpu,
    Cuda,
}

impl From<DeviceArg> for Device {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Cpu => Device::Cpu,
            DeviceArg::Cuda => Device::Cuda,
        }
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    // Refuse to start without the reference voice.
    verify_voice_sample(&cli.voice)?;
    // The engine resolves the path from its own working directory.
    let voice = cli.voice.canonicalize()?;

    let config = EngineConfig {
        model_name: cli.model_name,
        port: cli.engine_port,
        device: cli.device.map(Device::from),
        startup_timeout: Duration::from_secs(cli.startup_timeout),
    };
    let engine = XttsEngine::spawn(&config).await?;
    info!(device = %engine.device(), "model host initialized");

    let state = AppState::new(Arc::new(engine), voice, cli.language);
    let router = app(state);

    info!("listening on {}", cli.addr);
    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
