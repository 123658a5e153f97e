//! Module for searching for device config files

use std::{
    fs::{self, DirEntry},
    path::PathBuf,
};

/// Base system fallback path to use if one cannot be found with XDG
const FALLBACK_BASE_PATH: &str = "/usr/share/ds4-codec";

/// Returns the base path for configuration data
pub fn get_base_path() -> PathBuf {
    let Ok(base_dirs) = xdg::BaseDirectories::with_prefix("ds4-codec") else {
        log::warn!("Unable to determine config base path. Using fallback path.");
        return PathBuf::from(FALLBACK_BASE_PATH);
    };

    // Use the first data directory that exists
    if let Some(dir) = base_dirs.get_data_dirs().into_iter().find(|dir| dir.exists()) {
        return dir;
    }

    log::debug!("Config base path not found. Using fallback path.");
    PathBuf::from(FALLBACK_BASE_PATH)
}

/// Returns a list of directories in load order to find device configurations.
/// E.g. ["/etc/ds4-codec/devices.d", "/usr/share/ds4-codec/devices"]
pub fn get_devices_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/etc/ds4-codec/devices.d"),
        get_base_path().join("devices"),
        PathBuf::from("./rootfs/usr/share/ds4-codec/devices"),
    ]
}

/// Returns a list of file paths for the given directories sorted by filename.
/// Files with the same name are ordered by the position of their directory
/// in `paths`. The filter should return `true` for any files to include.
pub fn get_multidir_sorted_files<F>(paths: &[PathBuf], filter: F) -> Vec<PathBuf>
where
    F: Fn(&DirEntry) -> bool,
{
    let mut entries: Vec<(usize, DirEntry)> = Vec::new();
    for (priority, path) in paths.iter().enumerate() {
        log::trace!("Checking {path:?} for files");
        let files = match fs::read_dir(path) {
            Ok(files) => files,
            Err(e) => {
                log::debug!("Unable to read directory: {path:?}: {e}");
                continue;
            }
        };
        entries.extend(
            files
                .filter_map(Result::ok)
                .filter(|entry| filter(entry))
                .map(|entry| (priority, entry)),
        );
    }

    entries.sort_by(|(priority_a, a), (priority_b, b)| {
        a.file_name()
            .cmp(&b.file_name())
            .then(priority_a.cmp(priority_b))
    });
    log::trace!("Got sorted entries: {entries:?}");

    entries.into_iter().map(|(_, entry)| entry.path()).collect()
}
