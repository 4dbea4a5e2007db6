//! Clean path normalization.
//!
//! A clean path is absolute, slash-separated, and free of `.`/`..` segments,
//! duplicate slashes, and trailing slashes. The root is `"/"`.

/// Normalize a request path into a clean path.
///
/// Normalization is purely lexical: `..` at the root stays at the root, so the
/// result can never climb above `/`.
///
/// ```
/// use fsmd_content::clean_path;
///
/// assert_eq!(clean_path("docs//intro/"), "/docs/intro");
/// assert_eq!(clean_path("/docs/./a/../b"), "/docs/b");
/// assert_eq!(clean_path("/../.."), "/");
/// ```
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Parent directory of a clean path. The parent of `/` is `/`.
pub(crate) fn parent_dir(clean: &str) -> String {
    match clean.rfind('/') {
        Some(0) | None => "/".to_owned(),
        Some(idx) => clean[..idx].to_owned(),
    }
}

/// Join a clean directory path and an entry name into a clean path.
pub(crate) fn join(dir: &str, name: &str) -> String {
    clean_path(&format!("{dir}/{name}"))
}
