//! gridplate graphical (winit + softbuffer) entry point.

use std::time::Instant;

use gridplate_core::app::{AppRunner, EventLoopDriver};
use gridplate_lib::{GameConfig, GridModel, assets};
use gridplate_winit::{WinitConfig, WinitDriver};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::default();
    let (atlases, textures) = match assets::load(&config) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("cannot start: {e}");
            std::process::exit(1);
        }
    };

    let model = GridModel::new(&config, atlases, Instant::now());
    let driver = WinitDriver::new(WinitConfig {
        title: config.title.clone(),
        width: config.screen_width,
        height: config.screen_height,
        textures,
        ..Default::default()
    });

    let runner = AppRunner::new(Box::new(model));

    if let Err(e) = driver.run(runner) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
