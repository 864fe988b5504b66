use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of [`Session::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content was written to the tracked path.
    Written(PathBuf),
    /// No path is tracked yet; the caller must ask the user for a location
    /// and complete the save with [`Session::save_as`].
    NeedsLocation,
}

/// A single editing session: the file path the editor is currently
/// associated with, or nothing if the buffer has never been opened or saved.
///
/// The tracked path only changes on a successful read or write; a failed
/// operation leaves it where it was.
#[derive(Debug, Default)]
pub struct Session {
    current_file: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self { current_file: None }
    }

    /// The last successfully opened or saved location, if any.
    pub fn tracked_path(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Forget the tracked path (the "new file" operation).
    pub fn clear(&mut self) {
        self.current_file = None;
    }

    /// Read the whole file at `path` and track it as the current file.
    pub fn open(&mut self, path: &Path) -> Result<String, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
        self.current_file = Some(path.to_path_buf());
        Ok(content)
    }

    /// Overwrite the tracked file with `content` in full, or report that no
    /// location is tracked yet.
    pub fn save(&mut self, content: &str) -> Result<SaveOutcome, String> {
        match &self.current_file {
            Some(path) => {
                write_whole_file(path, content)?;
                Ok(SaveOutcome::Written(path.clone()))
            }
            None => Ok(SaveOutcome::NeedsLocation),
        }
    }

    /// Write `content` to `path` in full and track it as the current file.
    pub fn save_as(&mut self, path: &Path, content: &str) -> Result<PathBuf, String> {
        write_whole_file(path, content)?;
        self.current_file = Some(path.to_path_buf());
        Ok(path.to_path_buf())
    }
}

/// Whole-file overwrite. New files are created world-readable (0644) on
/// Unix; existing permissions are left alone.
fn write_whole_file(path: &Path, content: &str) -> Result<(), String> {
    use std::io::Write;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options
        .open(path)
        .map_err(|e| format!("Failed to open '{}' for writing: {}", path.display(), e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_tracks_nothing() {
        let session = Session::new();
        assert_eq!(session.tracked_path(), None);
    }

    #[test]
    fn clear_forgets_tracked_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut session = Session::new();
        session.save_as(&path, "hello").unwrap();
        assert!(session.tracked_path().is_some());

        session.clear();
        assert_eq!(session.tracked_path(), None);
    }

    #[test]
    fn open_reads_and_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let mut session = Session::new();
        let content = session.open(&path).unwrap();
        assert_eq!(content, "line one\nline two\n");
        assert_eq!(session.tracked_path(), Some(path.as_path()));
    }

    #[test]
    fn open_missing_file_errors_and_leaves_session() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let mut session = Session::new();
        session.save_as(&good, "kept").unwrap();

        let err = session.open(&dir.path().join("missing.txt")).unwrap_err();
        assert!(!err.is_empty());
        assert_eq!(session.tracked_path(), Some(good.as_path()));
    }

    #[test]
    fn save_without_location_delegates() {
        let mut session = Session::new();
        assert_eq!(session.save("anything").unwrap(), SaveOutcome::NeedsLocation);
        assert_eq!(session.tracked_path(), None);
    }

    #[test]
    fn save_overwrites_tracked_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut session = Session::new();
        session.save_as(&path, "first").unwrap();

        let outcome = session.save("second").unwrap();
        assert_eq!(outcome, SaveOutcome::Written(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn open_then_save_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "alpha\nbeta\n").unwrap();

        let mut session = Session::new();
        let content = session.open(&path).unwrap();
        session.save(&content).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\nbeta\n");
    }

    #[test]
    fn save_as_roundtrips_content() {
        let dir = tempfile::tempdir().unwrap();
        for (i, content) in ["", "plain ascii", "naïve héllo 世界 🦀"].iter().enumerate() {
            let path = dir.path().join(format!("file{}.txt", i));
            let mut session = Session::new();
            let saved = session.save_as(&path, content).unwrap();
            assert_eq!(saved, path);

            let mut reader = Session::new();
            assert_eq!(reader.open(&path).unwrap(), *content);
        }
    }

    #[test]
    fn save_as_failure_keeps_previous_path() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let mut session = Session::new();
        session.save_as(&good, "kept").unwrap();

        // Writing to a directory path fails
        let err = session.save_as(dir.path(), "nope").unwrap_err();
        assert!(!err.is_empty());
        assert_eq!(session.tracked_path(), Some(good.as_path()));
    }
}
