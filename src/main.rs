//! Demo window for the view controls.
//!
//! Usage: `view-controls [OPTIONS.toml]`. Alt-click an object to look
//! around it, drag to orbit and dolly, press Escape to return home.

use std::path::Path;

use view_controls::{Options, Viewer};

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => {
                log::info!("loaded options from {path}");
                options
            }
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder()
        .with_options(options)
        .with_title("View Controls")
        .build()
        .run()
    {
        log::error!("{e}");
        std::process::exit(1);
    }
}
