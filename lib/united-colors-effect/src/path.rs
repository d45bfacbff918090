use std::path::{Path, PathBuf};

/// Doubles every backslash, e.g. `C:\img\a.png` becomes `C:\\img\\a.png`.
pub fn escape_backslashes(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len() + path.matches('\\').count());
    for c in path.chars() {
        if c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Path as handed to the codec. Backslashes are escaped on Windows only,
/// elsewhere they are ordinary filename characters.
///
/// Verbatim (`\\?\`) and UNC (`\\server\share`) prefixes are doubled too,
/// which turns them into a different path, so only drive-letter or relative
/// paths should go through here.
pub fn codec_path(path: &Path) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(escape_backslashes(&path.to_string_lossy()))
    } else {
        path.to_path_buf()
    }
}
