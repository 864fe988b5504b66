use gtk4::gdk::RGBA;

/// Fixed window configuration, constructed once in `main` and passed to the
/// window bootstrap. There is no ambient global and no settings file; the
/// shell always starts the same way.
pub struct WindowConfig {
    pub title: &'static str,
    pub width: i32,
    pub height: i32,
    /// `false` gives the borderless frame.
    pub decorated: bool,
    /// Opaque background behind the webview.
    pub background: RGBA,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Jot",
            width: 500,
            height: 400,
            decorated: false,
            background: RGBA::WHITE,
        }
    }
}
