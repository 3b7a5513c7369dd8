use super::variables::Variable;
use crate::error::DebugError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One frame of the engine call stack, as reported by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    pub file: String,
    pub function: String,
    pub line: u32,
    pub id: u64,
}

/// Which group a chunk of variables belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Locals,
    Members,
    Globals,
}

/// Identifies one stack inspection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Variables of a single inspected frame, filled in chunk by chunk.
#[derive(Debug, Default)]
pub struct StackVariables {
    locals: Vec<Variable>,
    members: Vec<Variable>,
    globals: Vec<Variable>,
    remaining: usize,
    generation: u64,
}

impl StackVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new inspection expecting `count` chunks. Anything collected for
    /// the previous inspection is discarded.
    pub fn reset(&mut self, count: usize) -> Generation {
        self.locals.clear();
        self.members.clear();
        self.globals.clear();
        self.remaining = count;
        self.generation += 1;
        debug!(
            target: "debugger.runtime",
            "Stack inspection {} expects {} chunks",
            self.generation,
            count
        );
        Generation(self.generation)
    }

    /// Append one chunk to `scope`. Chunks tagged with an older generation are
    /// rejected and leave the snapshot untouched.
    pub fn push(
        &mut self,
        generation: Generation,
        scope: Scope,
        vars: Vec<Variable>,
    ) -> Result<(), DebugError> {
        if generation.0 != self.generation {
            return Err(DebugError::StaleChunk {
                expected: self.generation,
                got: generation.0,
            });
        }

        let group = match scope {
            Scope::Locals => &mut self.locals,
            Scope::Members => &mut self.members,
            Scope::Globals => &mut self.globals,
        };
        group.extend(vars);

        if self.remaining == 0 {
            warn!(
                target: "debugger.runtime",
                "Unexpected {:?} chunk for completed inspection {}",
                scope,
                self.generation
            );
        } else {
            self.remaining -= 1;
        }
        Ok(())
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn group(&self, scope: Scope) -> &[Variable] {
        match scope {
            Scope::Locals => &self.locals,
            Scope::Members => &self.members,
            Scope::Globals => &self.globals,
        }
    }

    /// Locals, then members, then globals.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.locals
            .iter()
            .chain(self.members.iter())
            .chain(self.globals.iter())
    }

    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(Scope, usize, &Variable),
    {
        for scope in [Scope::Locals, Scope::Members, Scope::Globals] {
            for (index, var) in self.group(scope).iter().enumerate() {
                visitor(scope, index, var);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.locals.len() + self.members.len() + self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
