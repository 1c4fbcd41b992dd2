//! Module naming and source stamping.
//!
//! Names are root-relative and `/`-separated on every host. JavaScript sources
//! are stamped with a `//# sourceURL=` comment so stack traces from the runtime
//! point back at the original file.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Marker text searched for (from the end) before stamping.
pub const SOURCE_URL_MARKER: &str = "//# sourceURL=";

const SCRIPT_PREFIX: &str = "<script:";
const SCRIPT_SUFFIX: &str = ">";

/// Synthetic identifier for the `index`-th inline script without a path.
pub fn script_id(index: usize) -> String {
    format!("{SCRIPT_PREFIX}{index}{SCRIPT_SUFFIX}")
}

/// Index of a synthetic script identifier, or `None` for real paths.
pub fn parse_script_id(name: &str) -> Option<usize> {
    name.strip_prefix(SCRIPT_PREFIX)?
        .strip_suffix(SCRIPT_SUFFIX)?
        .parse()
        .ok()
}

/// Whether `path` is a synthetic script identifier rather than a file.
pub fn is_script_path(path: &Path) -> bool {
    path.to_str().and_then(parse_script_id).is_some()
}

/// Render `path` with `/` separators regardless of host convention.
pub fn slash_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// Name of the module at `path`, relative to `root`.
///
/// Synthetic script identifiers are their own name. Paths outside `root`
/// are expressed with `..` segments. Collisions are not detected.
pub fn module_name(root: &Path, path: &Path) -> String {
    if is_script_path(path) {
        return path.to_string_lossy().into_owned();
    }
    slash_path(&relative_path(&root.clean(), &path.clean()))
}

fn relative_path(root: &Path, path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix(root) {
        return stripped.to_path_buf();
    }

    let root_parts: Vec<Component<'_>> = root.components().collect();
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let common = root_parts
        .iter()
        .zip(&path_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..root_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}

/// Locator embedded in the source URL marker: the synthetic id for inline
/// scripts, a `file://` URL otherwise.
pub fn source_locator(path: &Path) -> String {
    if is_script_path(path) {
        return path.to_string_lossy().into_owned();
    }

    let slashed = slash_path(path);
    let encoded = slashed
        .split('/')
        .map(|segment| {
            // Drive letters ("C:") stay readable.
            if segment.len() == 2 && segment.ends_with(':') {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    if encoded.starts_with('/') {
        format!("file://{encoded}")
    } else {
        format!("file:///{encoded}")
    }
}

/// Append a source URL marker to `code` unless one is already present.
///
/// The marker always goes on its own line so it can never be swallowed by
/// a trailing comment in the user's code.
pub fn with_source_url(mut code: String, locator: &str) -> String {
    if code.rfind(SOURCE_URL_MARKER).is_some() {
        return code;
    }
    code.push('\n');
    code.push_str(SOURCE_URL_MARKER);
    code.push_str(locator);
    code.push('\n');
    code
}

/// Fast line/column lookup using pre-calculated line offsets.
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Line and column (both 1-indexed, column in characters) of a byte offset.
    pub fn line_column(&self, offset: u32, source: &str) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(0) => 0,
            Err(idx) => idx - 1,
        };

        let line_start = self.line_starts[line_idx] as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());

        (line_idx as u32 + 1, column as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nested_file_name_is_forward_slashed() {
        let root = Path::new("/root");
        let path = Path::new("/root").join("sub").join("dir").join("file.js");
        assert_eq!(module_name(root, &path), "sub/dir/file.js");
    }

    #[test]
    fn name_outside_root_uses_parent_segments() {
        assert_eq!(
            module_name(Path::new("/w/src"), Path::new("/w/lib/util.js")),
            "../lib/util.js"
        );
    }

    #[test]
    fn script_ids_are_their_own_name() {
        let id = script_id(3);
        assert_eq!(id, "<script:3>");
        assert_eq!(parse_script_id(&id), Some(3));
        assert_eq!(module_name(Path::new("/w"), Path::new(&id)), id);
        assert_eq!(parse_script_id("<script:x>"), None);
        assert_eq!(parse_script_id("script.js"), None);
    }

    #[test]
    fn stamping_appends_marker_on_its_own_line() {
        let stamped = with_source_url("export {}; // trailing".into(), "file:///w/a.mjs");
        assert_eq!(stamped, "export {}; // trailing\n//# sourceURL=file:///w/a.mjs\n");
    }

    #[test]
    fn stamping_is_idempotent() {
        let once = with_source_url("1".into(), "<script:0>");
        let twice = with_source_url(once.clone(), "<script:0>");
        assert_eq!(once, twice);
    }

    #[test]
    fn locator_is_a_file_url() {
        assert_eq!(
            source_locator(Path::new("/w/my dir/a.mjs")),
            "file:///w/my%20dir/a.mjs"
        );
        assert_eq!(source_locator(Path::new("<script:0>")), "<script:0>");
    }

    #[test]
    fn line_index_reports_one_based_positions() {
        let source = "a\nbc\n  import(x)";
        let index = LineIndex::new(source);
        assert_eq!(index.line_column(0, source), (1, 1));
        assert_eq!(index.line_column(3, source), (2, 2));
        assert_eq!(index.line_column(7, source), (3, 3));
    }

    proptest! {
        #[test]
        fn name_is_segments_joined_by_slash(
            segments in prop::collection::vec("[a-z][a-z0-9_-]{0,8}", 1..6)
        ) {
            let root = PathBuf::from("/project");
            let mut path = root.clone();
            for segment in &segments {
                path.push(segment);
            }
            prop_assert_eq!(module_name(&root, &path), segments.join("/"));
        }
    }
}
