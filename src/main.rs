use std::path::PathBuf;

use anyhow::Result;

use smudge::app::SmudgeApp;
use smudge::config::EffectConfig;
use smudge::device::GpuInit;
use smudge::logging::{LoggingConfig, init_logging};
use smudge::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut config = EffectConfig::default();
    match std::env::args_os().nth(1) {
        Some(path) => config.image = Some(PathBuf::from(path)),
        None => log::warn!("no image path given, showing a placeholder (usage: smudge <image>)"),
    }

    let app = SmudgeApp::new(config);
    Runtime::run(RuntimeConfig::default(), GpuInit::default(), app)
}
