use super::paths::{normalize_separators, res_path};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Editor path with forward slashes.
    pub file: String,
    pub line: u32,
    pub id: u64,
}

/// Every breakpoint of a session, grouped by file in the order files were first
/// seen. Duplicates on the same `(file, line)` are kept, each with its own id.
#[derive(Debug, Default)]
pub struct Breakpoints {
    next_id: u64,
    points: IndexMap<String, Vec<Breakpoint>>,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: &str, line: u32) -> Breakpoint {
        let bp = Breakpoint {
            file: normalize_separators(file),
            line,
            id: self.next_id,
        };
        self.next_id += 1;

        self.points
            .entry(bp.file.clone())
            .or_default()
            .push(bp.clone());
        debug!(
            target: "debugger.runtime",
            "Breakpoint {} set at {}:{}",
            bp.id,
            bp.file,
            bp.line
        );
        bp
    }

    /// Remove the earliest breakpoint at `line` in `file`, if any.
    pub fn remove(&mut self, file: &str, line: u32) -> Option<Breakpoint> {
        let file = normalize_separators(file);
        let group = self.points.get_mut(&file)?;
        let index = group.iter().position(|bp| bp.line == line)?;
        let bp = group.remove(index);
        debug!(
            target: "debugger.runtime",
            "Breakpoint {} removed from {}:{}",
            bp.id,
            bp.file,
            bp.line
        );
        Some(bp)
    }

    pub fn get(&self, file: &str) -> &[Breakpoint] {
        self.points
            .get(&normalize_separators(file))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn all(&self) -> Vec<Breakpoint> {
        self.points.values().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.points.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every breakpoint. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Render all breakpoints as the engine's ` --breakpoints "..."` argument,
    /// or an empty string when there are none.
    ///
    /// Files that cannot be expressed as `res://` paths keep their editor path.
    pub fn launch_argument(&self, project_path: Option<&str>) -> String {
        let entries: Vec<String> = self
            .points
            .values()
            .flatten()
            .map(|bp| {
                let path = match project_path.and_then(|p| res_path(p, &bp.file)) {
                    Some(res) => res,
                    None => {
                        warn!(
                            target: "debugger.runtime",
                            "No resource path for {}, passing it through",
                            bp.file
                        );
                        bp.file.clone()
                    }
                };
                format!("{}:{}", path, bp.line)
            })
            .collect();

        if entries.is_empty() {
            return String::new();
        }
        format!(" --breakpoints \"{}\"", entries.join(","))
    }
}
