//! Translation between editor file paths and engine `res://` paths.

use tracing::debug;

pub const RES_SCHEME: &str = "res://";

/// Replace every backslash with a forward slash.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

#[derive(Debug, PartialEq)]
enum Root {
    Relative,
    Unix,
    Drive(String),
}

impl Root {
    fn case_insensitive(&self) -> bool {
        matches!(self, Root::Drive(_))
    }
}

/// A path split into its root and folded components (`.` dropped, `..` applied).
#[derive(Debug)]
struct SplitPath {
    root: Root,
    parts: Vec<String>,
}

impl SplitPath {
    fn parse(path: &str) -> Self {
        let normalized = normalize_separators(path);
        let (root, rest) = split_root(&normalized);

        let mut parts: Vec<String> = Vec::new();
        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    let can_pop = parts.last().map(|p| p != "..").unwrap_or(false);
                    if can_pop {
                        parts.pop();
                    } else if root == Root::Relative {
                        parts.push("..".to_string());
                    }
                }
                other => parts.push(other.to_string()),
            }
        }

        Self { root, parts }
    }

    /// Parent directory. `None` when the last component is `..`, since that
    /// names a directory rather than the manifest file.
    fn dirname(mut self) -> Option<Self> {
        if self.parts.last().map(String::as_str) == Some("..") {
            return None;
        }
        self.parts.pop();
        Some(self)
    }
}

fn split_root(path: &str) -> (Root, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        let drive = path[..2].to_ascii_lowercase();
        return (Root::Drive(drive), &path[2..]);
    }
    if path.starts_with('/') {
        return (Root::Unix, path);
    }
    (Root::Relative, path)
}

fn same_segment(a: &str, b: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Lexical relative path from directory `from` to `to`, with forward slashes.
///
/// Returns `None` when the two paths live under different roots (another drive,
/// or one absolute and one relative), or when `from` climbs above the common
/// prefix with `..`, since no relative form exists without knowing the cwd.
fn relative(from: &SplitPath, to: &SplitPath) -> Option<String> {
    if from.root != to.root {
        return None;
    }
    let ci = from.root.case_insensitive();

    let common = from
        .parts
        .iter()
        .zip(&to.parts)
        .take_while(|(a, b)| same_segment(a, b, ci))
        .count();

    if from.parts[common..].iter().any(|p| p == "..") {
        return None;
    }

    let mut out: Vec<&str> = Vec::new();
    for _ in common..from.parts.len() {
        out.push("..");
    }
    out.extend(to.parts[common..].iter().map(String::as_str));

    Some(out.join("/"))
}

/// Map `file` to its `res://` form relative to the directory containing
/// `project_path` (the `project.godot` manifest, not its directory).
///
/// Returns `None` when the file is the project directory itself or lies on a
/// different root than the project.
pub fn res_path(project_path: &str, file: &str) -> Option<String> {
    let target = SplitPath::parse(file);
    let relative_path = match SplitPath::parse(project_path)
        .dirname()
        .and_then(|dir| relative(&dir, &target))
    {
        Some(rel) => rel,
        None => {
            debug!(
                target: "debugger.runtime",
                "Cannot relativize \"{}\" against \"{}\"",
                file,
                project_path
            );
            return None;
        }
    };

    debug!(
        target: "debugger.runtime",
        "Relativizing path at \"{}\" to project \"{}\": \"{}\"",
        file,
        project_path,
        relative_path
    );

    if relative_path.is_empty() {
        None
    } else {
        Some(format!("{}{}", RES_SCHEME, relative_path))
    }
}

/// Inverse of [`res_path`]: the editor path of a `res://` resource, under the
/// directory containing `project_path`. Paths without the scheme are returned
/// with normalized separators.
pub fn local_path(project_path: &str, resource: &str) -> String {
    let Some(relative_path) = resource.strip_prefix(RES_SCHEME) else {
        return normalize_separators(resource);
    };
    let project_dir = normalize_separators(project_path);
    let project_dir = match project_dir.rfind('/') {
        Some(0) => "/",
        Some(idx) => &project_dir[..idx],
        None => ".",
    };
    if project_dir.ends_with('/') {
        format!("{}{}", project_dir, relative_path)
    } else {
        format!("{}/{}", project_dir, relative_path)
    }
}
