use std::fmt;
use std::path::Path;

/// Compute device the engine runs inference on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cuda,
    Cpu,
}

impl Device {
    /// Pick an accelerator when one is visible, otherwise fall back to the
    /// CPU. Setting `CUDA_VISIBLE_DEVICES` to an empty string or `-1` masks
    /// the accelerator even when a driver is installed.
    pub fn detect() -> Self {
        if let Ok(visible) = std::env::var("CUDA_VISIBLE_DEVICES") {
            let visible = visible.trim();
            if visible.is_empty() || visible == "-1" {
                return Device::Cpu;
            }
        }
        if Path::new("/proc/driver/nvidia").exists() {
            Device::Cuda
        } else {
            Device::Cpu
        }
    }

    /// Whether the engine should be told to use CUDA.
    pub fn use_cuda(self) -> bool {
        matches!(self, Device::Cuda)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cuda => write!(f, "cuda"),
            Device::Cpu => write!(f, "cpu"),
        }
    }
}
