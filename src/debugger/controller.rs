//! Seams to the collaborators that live outside this crate.

use serde::{Deserialize, Serialize};

/// The process-facing side that forwards breakpoint edits to the running engine.
///
/// Calls are fire-and-forget: delivery is the implementor's concern.
pub trait LiveController {
    fn set_breakpoint(&mut self, res_path: &str, line: u32);
    fn remove_breakpoint(&mut self, res_path: &str, line: u32);
}

/// A node of the remote scene tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneNode {
    pub label: String,
    pub class_name: String,
    pub object_id: i64,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(label: impl Into<String>, class_name: impl Into<String>, object_id: i64) -> Self {
        Self {
            label: label.into(),
            class_name: class_name.into(),
            object_id,
            children: Vec::new(),
        }
    }

    /// Path of labels from the root, e.g. `/root/Main/Player`.
    pub fn find_path(&self, object_id: i64) -> Option<String> {
        if self.object_id == object_id {
            return Some(format!("/{}", self.label));
        }
        self.children
            .iter()
            .find_map(|child| child.find_path(object_id))
            .map(|rest| format!("/{}{}", self.label, rest))
    }
}

/// UI component that displays the remote scene tree.
pub trait SceneTreeProvider {
    fn fill_tree(&mut self, tree: &SceneNode);
}
