use super::breakpoints::{Breakpoint, Breakpoints};
use super::controller::{LiveController, SceneNode, SceneTreeProvider};
use super::paths::{local_path, normalize_separators, res_path};
use super::stack::{Generation, Scope, StackFrame, StackVariables};
use super::variables::Variable;
use crate::error::DebugError;
use tracing::{debug, info};

/// Host-side state of one debug session.
///
/// The UI and the live controller both call into this. A session may exist,
/// and collect breakpoints, before any controller attaches; anything that
/// needs the controller quietly stays local until then.
#[derive(Default)]
pub struct DebugSession {
    breakpoints: Breakpoints,
    pub last_frame: Option<StackFrame>,
    pub last_frames: Vec<StackFrame>,
    pub stack_count: usize,
    pub stack_files: Vec<String>,
    stack_vars: StackVariables,
    project_path: Option<String>,
    scene_tree: Option<Box<dyn SceneTreeProvider>>,
    controller: Option<Box<dyn LiveController>>,
}

impl std::fmt::Debug for DebugSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugSession")
            .field("breakpoints", &self.breakpoints)
            .field("last_frame", &self.last_frame)
            .field("stack_count", &self.stack_count)
            .field("project_path", &self.project_path)
            .field("has_controller", &self.controller.is_some())
            .field("has_scene_tree", &self.scene_tree.is_some())
            .finish()
    }
}

impl DebugSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(project_path: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set_project_path(project_path);
        session
    }

    pub fn project_path(&self) -> Option<&str> {
        self.project_path.as_deref()
    }

    /// `project_path` is the `project.godot` manifest, not its directory.
    pub fn set_project_path(&mut self, project_path: impl Into<String>) {
        let project_path = project_path.into();
        info!(target: "debugger.runtime", "Project manifest: {}", project_path);
        self.project_path = Some(project_path);
    }

    pub fn attach_controller(&mut self, controller: Box<dyn LiveController>) {
        debug!(target: "debugger.runtime", "Controller attached");
        self.controller = Some(controller);
    }

    pub fn detach_controller(&mut self) -> Option<Box<dyn LiveController>> {
        debug!(target: "debugger.runtime", "Controller detached");
        self.controller.take()
    }

    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }

    pub fn attach_scene_tree(&mut self, provider: Box<dyn SceneTreeProvider>) {
        self.scene_tree = Some(provider);
    }

    pub fn update_scene_tree(&mut self, tree: &SceneNode) {
        if let Some(provider) = self.scene_tree.as_mut() {
            provider.fill_tree(tree);
        }
    }

    /// `res://` form of `file`, or `None` without a project path or when the
    /// file has no resource path.
    pub fn res_path(&self, file: &str) -> Option<String> {
        res_path(self.project_path.as_deref()?, file)
    }

    /// Editor path for a `res://` path reported by the engine.
    pub fn local_path(&self, resource: &str) -> String {
        match self.project_path.as_deref() {
            Some(project) => local_path(project, resource),
            None => normalize_separators(resource),
        }
    }

    /// Controller and resolved resource path, when both exist right now.
    fn live_target(&mut self, file: &str) -> Option<(&mut Box<dyn LiveController>, String)> {
        let path = self.res_path(file)?;
        let controller = self.controller.as_mut()?;
        Some((controller, path))
    }

    pub fn set_breakpoint(&mut self, file: &str, line: u32) {
        let bp = self.breakpoints.add(file, line);
        if let Some((controller, path)) = self.live_target(&bp.file) {
            controller.set_breakpoint(&path, bp.line);
        }
    }

    pub fn remove_breakpoint(&mut self, file: &str, line: u32) {
        let Some(bp) = self.breakpoints.remove(file, line) else {
            return;
        };
        if let Some((controller, path)) = self.live_target(&bp.file) {
            controller.remove_breakpoint(&path, bp.line);
        }
    }

    pub fn get_all_breakpoints(&self) -> Vec<Breakpoint> {
        self.breakpoints.all()
    }

    pub fn get_breakpoints(&self, file: &str) -> &[Breakpoint] {
        self.breakpoints.get(file)
    }

    pub fn get_breakpoint_string(&self) -> String {
        self.breakpoints.launch_argument(self.project_path.as_deref())
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Replace the known call stack with a fresh stop event, top frame first.
    pub fn set_stack_frames(&mut self, frames: Vec<StackFrame>) {
        self.last_frame = frames.first().cloned();
        self.stack_count = frames.len();
        self.stack_files.clear();
        for frame in &frames {
            if !self.stack_files.contains(&frame.file) {
                self.stack_files.push(frame.file.clone());
            }
        }
        self.last_frames = frames;
    }

    /// Forget the current stop, e.g. on resume.
    pub fn clear_stack(&mut self) {
        self.last_frame = None;
        self.last_frames.clear();
        self.stack_count = 0;
        self.stack_files.clear();
        self.stack_vars.reset(0);
    }

    pub fn frame(&self, id: u64) -> Option<&StackFrame> {
        self.last_frames.iter().find(|f| f.id == id)
    }

    pub fn begin_stack_inspection(&mut self, chunks: usize) -> Generation {
        self.stack_vars.reset(chunks)
    }

    pub fn receive_variables(
        &mut self,
        generation: Generation,
        scope: Scope,
        vars: Vec<Variable>,
    ) -> Result<(), DebugError> {
        self.stack_vars.push(generation, scope, vars)
    }

    pub fn stack_vars(&self) -> &StackVariables {
        &self.stack_vars
    }
}
