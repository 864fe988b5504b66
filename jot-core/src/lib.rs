//! Platform-neutral core for the Jot editor shell: the editing session and
//! its whole-file read/write operations. Frontends own the dialogs; this
//! crate owns the tracked path and the filesystem.

pub mod session;
