//! Desktop, menu and folder shortcuts.
//!
//! Provides functionality for creating:
//! - Application menu shortcuts (.desktop files in ~/.local/share/applications)
//! - Desktop shortcuts (.desktop files or links on ~/Desktop)
//! - Folder shortcuts (symlinks on Unix, .lnk files on Windows)
//!
//! # Platform Support
//!
//! - **Linux**: XDG Desktop Entry Specification for executables, symlinks for folders
//! - **macOS**: symlinks
//! - **Windows**: `.lnk` shell links

mod creator;
mod desktop_entry;
mod link;

pub use creator::{ShortcutCreator, ShortcutKind, ShortcutOutcome};
pub use desktop_entry::{DesktopEntry, DesktopEntryBuilder};
pub use link::create_link;
