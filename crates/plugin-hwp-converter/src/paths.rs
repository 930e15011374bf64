//! Engine-facing path composition.
//!
//! Paths handed to the engine are plain strings in the style of the
//! directory they are rooted at, so a Windows workspace produces
//! backslash-separated arguments regardless of where this code runs.

/// Separator style of `base`.
///
/// Drive and UNC prefixes mean backslash. A leading `/` or any other `/`
/// means slash; backslashes are then part of a name.
/// Backslash-only paths use backslash; bare names use the platform separator.
pub fn separator_for(base: &str) -> char {
    if has_drive_prefix(base) || base.starts_with(r"\\") {
        '\\'
    } else if base.contains('/') {
        '/'
    } else if base.contains('\\') {
        '\\'
    } else {
        std::path::MAIN_SEPARATOR
    }
}

/// Remove trailing `/` or `\` separators.
///
/// A path made only of separators keeps its first one, and a drive root
/// such as `D:\` keeps the separator after the drive, so roots stay roots.
pub fn trim_trailing_separator(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() && !path.is_empty() {
        &path[..1]
    } else if trimmed.len() == 2 && has_drive_prefix(trimmed) && path.len() > 2 {
        &path[..3]
    } else {
        trimmed
    }
}

/// Join `relative` onto `base`, using the separator style of `base`.
///
/// `relative` may use either separator; empty and `.` segments are dropped.
pub fn join(base: &str, relative: &str) -> String {
    let sep = separator_for(base);
    let base = trim_trailing_separator(base);

    let mut joined = base.to_string();
    for segment in relative
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
    {
        if !joined.is_empty() && !joined.ends_with(['/', '\\']) {
            joined.push(sep);
        }
        joined.push_str(segment);
    }
    joined
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_is_idempotent() {
        assert_eq!(trim_trailing_separator(r"C:\out\"), r"C:\out");
        assert_eq!(trim_trailing_separator(r"C:\out\\"), r"C:\out");
        assert_eq!(trim_trailing_separator(r"C:\out"), r"C:\out");
        assert_eq!(
            trim_trailing_separator(trim_trailing_separator("/tmp/out//")),
            "/tmp/out"
        );
    }

    #[test]
    fn test_trim_keeps_root() {
        assert_eq!(trim_trailing_separator("/"), "/");
        assert_eq!(trim_trailing_separator(""), "");
    }

    #[test]
    fn test_trim_keeps_drive_root() {
        assert_eq!(trim_trailing_separator(r"D:\"), r"D:\");
        assert_eq!(trim_trailing_separator(r"D:\\"), r"D:\");
        assert_eq!(trim_trailing_separator("D:/"), "D:/");
        assert_eq!(trim_trailing_separator("D:"), "D:");
        assert_eq!(join(r"D:\", "todo.hwp"), r"D:\todo.hwp");
    }

    #[test]
    fn test_join_windows_style() {
        assert_eq!(join(r"C:\Out\", "todo.hwp"), r"C:\Out\todo.hwp");
        assert_eq!(join(r"C:\Out", "todo.hwp"), r"C:\Out\todo.hwp");
        assert_eq!(join(r"C:\vault", "notes/todo.md"), r"C:\vault\notes\todo.md");
        assert_eq!(join("D:", "x.hwp"), r"D:\x.hwp");
    }

    #[test]
    fn test_join_unix_style() {
        assert_eq!(join("/home/me/vault", "notes/todo.md"), "/home/me/vault/notes/todo.md");
        assert_eq!(join("/out/", "./a.hwp"), "/out/a.hwp");
        assert_eq!(join("/", "a.hwp"), "/a.hwp");
    }

    #[test]
    fn test_separator_detection() {
        assert_eq!(separator_for(r"C:\x"), '\\');
        assert_eq!(separator_for("C:"), '\\');
        assert_eq!(separator_for("/x"), '/');
        assert_eq!(separator_for(r"\\server\share"), '\\');
        assert_eq!(separator_for(r"vault\notes"), '\\');
        assert_eq!(separator_for(r"/home/me/my\vault"), '/');
        assert_eq!(separator_for(r"home/my\vault"), '/');
    }

    #[test]
    fn test_join_unix_path_with_backslash_in_name() {
        assert_eq!(
            join(r"/home/me/my\vault", "notes/todo.md"),
            r"/home/me/my\vault/notes/todo.md"
        );
    }
}
