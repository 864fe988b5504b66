use fs2::FileExt;
use std::path::PathBuf;

pub const EDITOR_HTML: &str = include_str!("../web/editor.html");
pub const EDITOR_JS: &str = include_str!("../web/editor.js");

pub const BUNDLE_VERSION: &str = "0.2.0";

/// Ensure the front-end bundle is extracted to the local data directory.
///
/// Returns the path to the extraction directory
/// (e.g. `~/.local/share/jot/web/0.2.0/` on Linux).
pub fn ensure_bundle_extracted() -> Result<PathBuf, String> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| "Cannot determine data home directory".to_string())?;

    let bundle_dir = data_dir.join("jot").join("web").join(BUNDLE_VERSION);

    // Acquire exclusive lock to make check-and-extract atomic
    let lock_path = data_dir.join("jot").join("web").join(".extract.lock");
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create lock directory: {}", e))?;
    }
    let lock_file = std::fs::File::create(&lock_path)
        .map_err(|e| format!("Failed to create lock file: {}", e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| format!("Failed to acquire extraction lock: {}", e))?;

    let marker = bundle_dir.join(".complete");

    // Check if already extracted with matching version
    if marker.is_file() {
        if let Ok(version) = std::fs::read_to_string(&marker) {
            if version.trim() == BUNDLE_VERSION {
                // Always overwrite the page and script (they change between builds)
                write_bundle_files(&bundle_dir)?;
                return Ok(bundle_dir);
            }
        }
        log::info!("Front-end bundle version mismatch, re-extracting...");
        let _ = std::fs::remove_dir_all(&bundle_dir);
    }

    log::info!(
        "Extracting front-end bundle v{} to {:?}",
        BUNDLE_VERSION,
        bundle_dir
    );

    std::fs::create_dir_all(&bundle_dir)
        .map_err(|e| format!("Failed to create bundle directory: {}", e))?;

    // Restrict directory permissions to owner-only on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&bundle_dir, std::fs::Permissions::from_mode(0o700));
    }

    write_bundle_files(&bundle_dir)?;

    // Write completion marker last (incomplete extraction = retry next time)
    std::fs::write(&marker, BUNDLE_VERSION)
        .map_err(|e| format!("Failed to write completion marker: {}", e))?;

    Ok(bundle_dir)
}

fn write_bundle_files(bundle_dir: &std::path::Path) -> Result<(), String> {
    std::fs::write(bundle_dir.join("editor.html"), EDITOR_HTML)
        .map_err(|e| format!("Failed to write editor.html: {}", e))?;
    std::fs::write(bundle_dir.join("editor.js"), EDITOR_JS)
        .map_err(|e| format!("Failed to write editor.js: {}", e))?;
    Ok(())
}
