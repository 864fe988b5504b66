mod bridge;
mod config;
mod window;

use libadwaita as adw;
use libadwaita::prelude::*;

const APP_ID: &str = "dev.jot.Jot";

fn main() {
    env_logger::init();

    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        log::info!("Application started");
        let config = config::WindowConfig::default();
        window::build_window(app, &config);
    });

    app.run();
}
