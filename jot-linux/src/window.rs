use gtk4::prelude::*;
use libadwaita as adw;
use libadwaita::prelude::*;

use crate::bridge;
use crate::config::WindowConfig;

/// Build the single application window and wire the editor webview into it.
pub fn build_window(app: &adw::Application, config: &WindowConfig) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(config.title)
        .default_width(config.width)
        .default_height(config.height)
        .decorated(config.decorated)
        .build();

    let (container, _handle) = bridge::create_editor_webview(&window, &config.background);
    window.set_content(Some(&container));

    window.present();
}
