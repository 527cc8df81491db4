use anyhow::{Context, anyhow};
use env_logger::{Builder, Target};
use kinescope::{Settings, app_core::Kinescope, domain::SourceLocator, overwrite_line};
use log::LevelFilter;
use std::fs::{self, OpenOptions};

// stdout belongs to the terminal ui, so logs only go to a file
fn init_logger(settings: &Settings) {
    let Some(path) = settings.log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let mut builder = match std::env::var("RUST_LOG") {
        Ok(_) => Builder::from_default_env(),
        Err(_) => {
            let mut b = Builder::new();
            b.filter_level(LevelFilter::Warn)
                .filter_module("kinescope", LevelFilter::Debug);
            b
        }
    };

    builder.target(Target::Pipe(Box::new(file))).init();
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Could not read config.toml")?;
    init_logger(&settings);

    let raw = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: kinescope <media file>"))?;
    let source = SourceLocator::parse(&raw)?;

    log::info!("Starting with {source}");
    Kinescope::new(source, &settings).run()?;

    overwrite_line("Playback closed.\n")?;
    Ok(())
}
