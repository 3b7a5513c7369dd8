mod breakpoints;
mod controller;
mod paths;
mod session;
mod stack;
mod variables;

pub use breakpoints::{Breakpoint, Breakpoints};
pub use controller::{LiveController, SceneNode, SceneTreeProvider};
pub use paths::{local_path, normalize_separators, res_path, RES_SCHEME};
pub use session::DebugSession;
pub use stack::{Generation, Scope, StackFrame, StackVariables};
pub use variables::{EngineObject, ObjectId, RawObject, Value, Variable};
