//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "norpie";
const APPLICATION: &str = "treeview";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/treeview` or `~/.config/treeview`
/// - macOS: `~/Library/Application Support/dev.norpie.treeview`
/// - Windows: `C:\Users\<User>\AppData\Roaming\norpie\treeview\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default options file, read when `--config` is not given.
pub fn options_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("options.toml"))
}
