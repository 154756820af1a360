use std::fmt;

use crate::core::NodeKind;

/// Progress of one processing run. Each transition follows a level barrier:
/// every calculator at that level has finished on every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProcessingState {
    Init,
    MethodsDone,
    TypesDone,
    PackagesDone,
    ProjectDone,
}

impl ProcessingState {
    /// The level whose completion moves the run out of this state.
    pub fn next_level(self) -> Option<NodeKind> {
        match self {
            Self::Init => Some(NodeKind::Method),
            Self::MethodsDone => Some(NodeKind::Type),
            Self::TypesDone => Some(NodeKind::Package),
            Self::PackagesDone => Some(NodeKind::Project),
            Self::ProjectDone => None,
        }
    }

    /// State reached once `level` is complete.
    pub fn after(level: NodeKind) -> Self {
        match level {
            NodeKind::Method => Self::MethodsDone,
            NodeKind::Type => Self::TypesDone,
            NodeKind::Package => Self::PackagesDone,
            NodeKind::Project => Self::ProjectDone,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::ProjectDone
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::MethodsDone => write!(f, "methods_done"),
            Self::TypesDone => write!(f, "types_done"),
            Self::PackagesDone => write!(f, "packages_done"),
            Self::ProjectDone => write!(f, "project_done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_walk_levels_bottom_up() {
        let mut state = ProcessingState::Init;
        let mut levels = Vec::new();
        while let Some(level) = state.next_level() {
            levels.push(level);
            state = ProcessingState::after(level);
        }
        assert_eq!(levels, NodeKind::BOTTOM_UP.to_vec());
        assert!(state.is_terminal());
    }
}
