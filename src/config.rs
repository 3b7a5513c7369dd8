//! Launch configuration as sent by the editor.

use crate::debugger::{normalize_separators, DebugSession};
use crate::error::DebugError;
use serde::{Deserialize, Serialize};

pub const PROJECT_MANIFEST: &str = "project.godot";

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6007
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Project directory, or its `project.godot` manifest.
    pub project: String,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl LaunchConfig {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            address: default_address(),
            port: default_port(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DebugError> {
        let config: Self = serde_json::from_str(json)?;
        if config.project.trim().is_empty() {
            return Err(DebugError::MissingProject);
        }
        Ok(config)
    }

    /// Path of the `project.godot` manifest. `project` names the manifest only
    /// when its last component is exactly `project.godot`.
    pub fn project_manifest(&self) -> Result<String, DebugError> {
        let project = normalize_separators(&self.project);
        let project = project.trim_end_matches('/');
        if project.is_empty() {
            return Err(DebugError::MissingProject);
        }
        if project.rsplit('/').next() == Some(PROJECT_MANIFEST) {
            Ok(project.to_string())
        } else {
            Ok(format!("{}/{}", project, PROJECT_MANIFEST))
        }
    }

    /// Session pointed at this project's manifest.
    pub fn new_session(&self) -> Result<DebugSession, DebugError> {
        Ok(DebugSession::with_project(self.project_manifest()?))
    }
}
