use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4::gio;
use gtk4::prelude::*;
use libadwaita as adw;
use webkit6::prelude::*;

use jot_core::session::{SaveOutcome, Session};
use jot_editor::protocol::{BridgeCommand, BridgeEvent};

/// Name of the WebKit script message handler the front end posts to
/// (`window.webkit.messageHandlers.jot`).
const MESSAGE_HANDLER: &str = "jot";

/// Handle for communicating with the editor front end running inside a
/// WebView. Owns the session state; mutated only by bridge events, which
/// arrive serially on the GTK main loop.
pub struct BridgeHandle {
    webview: webkit6::WebView,
    session: RefCell<Session>,
    is_ready: Cell<bool>,
}

impl BridgeHandle {
    fn send_command(&self, cmd: &BridgeCommand) {
        if !self.is_ready.get() {
            log::warn!("Editor surface not ready yet, dropping command");
            return;
        }
        let json = match serde_json::to_string(cmd) {
            Ok(j) => j,
            Err(e) => {
                log::error!("Failed to serialize BridgeCommand: {}", e);
                return;
            }
        };
        // Escape for embedding in a JS string literal
        let escaped = json.replace('\\', "\\\\").replace('\'', "\\'");
        let script = format!("jotReceiveCommand('{}')", escaped);
        self.webview.evaluate_javascript(
            &script,
            None,
            None,
            None::<&gio::Cancellable>,
            |_| {},
        );
    }
}

/// Create the editor WebView and wire the file bridge to it.
///
/// Returns the container `gtk4::Box` and the bridge handle. File dialogs
/// are presented transient for `window`.
pub fn create_editor_webview(
    window: &adw::ApplicationWindow,
    background: &gtk4::gdk::RGBA,
) -> (gtk4::Box, Rc<BridgeHandle>) {
    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    container.set_hexpand(true);
    container.set_vexpand(true);

    // Create the UserContentManager and register our message handler
    let user_content_manager = webkit6::UserContentManager::new();

    // Build the WebView
    let webview = webkit6::WebView::builder()
        .user_content_manager(&user_content_manager)
        .hexpand(true)
        .vexpand(true)
        .build();

    // Match the window background so nothing flashes during load
    webview.set_background_color(background);

    // Configure WebView settings
    if let Some(wk_settings) = webkit6::prelude::WebViewExt::settings(&webview) {
        wk_settings.set_enable_javascript(true);
        wk_settings.set_allow_file_access_from_file_urls(true);
    }

    let handle = Rc::new(BridgeHandle {
        webview: webview.clone(),
        session: RefCell::new(Session::new()),
        is_ready: Cell::new(false),
    });

    // Connect JS→Rust message handler
    let window_for_signal = window.clone();
    let handle_for_signal = handle.clone();
    user_content_manager.register_script_message_handler(MESSAGE_HANDLER, None);
    user_content_manager.connect_script_message_received(
        Some(MESSAGE_HANDLER),
        move |_ucm, value| {
            let json_str = value.to_str().to_string();

            let event: BridgeEvent = match serde_json::from_str(&json_str) {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Failed to parse BridgeEvent: {} (json: {})", e, json_str);
                    return;
                }
            };

            dispatch_event(&window_for_signal, &handle_for_signal, event);
        },
    );

    // Extract the bundled front end and load it from the local filesystem
    match jot_editor::assets::ensure_bundle_extracted() {
        Ok(bundle_dir) => {
            let uri = format!("file://{}/editor.html", bundle_dir.display());
            webview.load_uri(&uri);
        }
        Err(e) => {
            log::error!("Failed to extract front-end bundle: {}", e);
            let error_html = format!(
                "<html><body style='background:#ffffff;color:#1a1a1a;font-family:monospace;padding:2em'>\
                 <h3>Editor failed to load</h3><p>{}</p></body></html>",
                e
            );
            webview.load_html(&error_html, None);
        }
    }

    container.append(&webview);

    (container, handle)
}

fn dispatch_event(window: &adw::ApplicationWindow, handle: &Rc<BridgeHandle>, event: BridgeEvent) {
    match event {
        BridgeEvent::Ready => {
            handle.is_ready.set(true);
            log::info!("Editor surface ready");
        }
        BridgeEvent::NewFileRequested { request_id } => {
            handle.session.borrow_mut().clear();
            handle.send_command(&BridgeCommand::FileCleared { request_id });
        }
        BridgeEvent::OpenFileRequested { request_id } => {
            open_with_dialog(window, handle, request_id);
        }
        BridgeEvent::SaveRequested {
            request_id,
            content,
        } => {
            let outcome = handle.session.borrow_mut().save(&content);
            match outcome {
                Ok(SaveOutcome::Written(path)) => {
                    handle.send_command(&BridgeCommand::FileSaved {
                        request_id,
                        path: path.display().to_string(),
                    });
                }
                Ok(SaveOutcome::NeedsLocation) => {
                    save_with_dialog(window, handle, request_id, content);
                }
                Err(message) => {
                    log::error!("Save failed: {}", message);
                    handle.send_command(&BridgeCommand::OperationFailed {
                        request_id,
                        message,
                    });
                }
            }
        }
        BridgeEvent::SaveAsRequested {
            request_id,
            content,
        } => {
            save_with_dialog(window, handle, request_id, content);
        }
    }
}

// ---------------------------------------------------------------------------
// Native file dialogs
// ---------------------------------------------------------------------------

/// Filter shown by both dialogs: plain text files.
fn text_file_filters() -> gio::ListStore {
    let filter = gtk4::FileFilter::new();
    filter.set_name(Some("Text Files (*.txt)"));
    filter.add_pattern("*.txt");

    let filters = gio::ListStore::new::<gtk4::FileFilter>();
    filters.append(&filter);
    filters
}

/// User-dismissed dialogs come back as GTK errors; they are not failures.
fn is_dismissed(err: &gtk4::glib::Error) -> bool {
    err.matches(gtk4::DialogError::Dismissed) || err.matches(gtk4::DialogError::Cancelled)
}

fn open_with_dialog(window: &adw::ApplicationWindow, handle: &Rc<BridgeHandle>, request_id: u64) {
    let window = window.clone();
    let handle = handle.clone();
    gtk4::glib::spawn_future_local(async move {
        let dialog = gtk4::FileDialog::builder()
            .title("Open File")
            .modal(true)
            .filters(&text_file_filters())
            .build();

        let file = match dialog.open_future(Some(&window)).await {
            Ok(file) => file,
            Err(err) if is_dismissed(&err) => {
                handle.send_command(&BridgeCommand::DialogCancelled { request_id });
                return;
            }
            Err(err) => {
                log::error!("Open dialog failed: {}", err);
                handle.send_command(&BridgeCommand::OperationFailed {
                    request_id,
                    message: err.to_string(),
                });
                return;
            }
        };

        let path = match file.path() {
            Some(p) => p,
            None => {
                handle.send_command(&BridgeCommand::OperationFailed {
                    request_id,
                    message: "Selected file has no local path".to_string(),
                });
                return;
            }
        };

        match handle.session.borrow_mut().open(&path) {
            Ok(content) => {
                handle.send_command(&BridgeCommand::FileOpened {
                    request_id,
                    path: path.display().to_string(),
                    content,
                });
            }
            Err(message) => {
                log::error!("Open failed: {}", message);
                handle.send_command(&BridgeCommand::OperationFailed {
                    request_id,
                    message,
                });
            }
        }
    });
}

fn save_with_dialog(
    window: &adw::ApplicationWindow,
    handle: &Rc<BridgeHandle>,
    request_id: u64,
    content: String,
) {
    let window = window.clone();
    let handle = handle.clone();
    gtk4::glib::spawn_future_local(async move {
        let dialog = gtk4::FileDialog::builder()
            .title("Save File As")
            .modal(true)
            .initial_name("untitled.txt")
            .filters(&text_file_filters())
            .build();

        let file = match dialog.save_future(Some(&window)).await {
            Ok(file) => file,
            Err(err) if is_dismissed(&err) => {
                handle.send_command(&BridgeCommand::DialogCancelled { request_id });
                return;
            }
            Err(err) => {
                log::error!("Save dialog failed: {}", err);
                handle.send_command(&BridgeCommand::OperationFailed {
                    request_id,
                    message: err.to_string(),
                });
                return;
            }
        };

        let path = match file.path() {
            Some(p) => p,
            None => {
                handle.send_command(&BridgeCommand::OperationFailed {
                    request_id,
                    message: "Chosen location has no local path".to_string(),
                });
                return;
            }
        };

        match handle.session.borrow_mut().save_as(&path, &content) {
            Ok(path) => {
                handle.send_command(&BridgeCommand::FileSaved {
                    request_id,
                    path: path.display().to_string(),
                });
            }
            Err(message) => {
                log::error!("Save As failed: {}", message);
                handle.send_command(&BridgeCommand::OperationFailed {
                    request_id,
                    message,
                });
            }
        }
    });
}
