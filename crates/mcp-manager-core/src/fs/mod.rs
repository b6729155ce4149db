//! Filesystem path helpers.

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` or `~/` to `home`, anchor relative paths at `cwd`
/// and lexically fold `.` and `..` components. `~name` is left as a
/// relative path, as a shell would leave an unknown user.
///
/// The result is not checked for existence.
pub fn normalize_path(input: &str, home: &Path, cwd: &Path) -> PathBuf {
    let home_str = home.to_string_lossy();
    let expanded = shellexpand::tilde_with_context(input, || Some(home_str.as_ref()));
    let expanded = Path::new(expanded.as_ref());

    let joined = if expanded.is_absolute() {
        expanded.to_path_buf()
    } else {
        cwd.join(expanded)
    };

    lexically_normalize(&joined)
}

fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to climb above the root.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Last path component as a string, used as the project identifier.
pub fn dir_basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
