//! Symbol resolution seam between the parser and the graph builders.

use thiserror::Error;

use super::body::{CallResolution, MethodCall, MethodTarget, ObjectCreation};
use super::declarations::{QualifiedName, Resolution, TypeReference};

/// Why a reference could not be mapped to a declaration. Never escapes the
/// graph builders: every variant means "no edge".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("`{0}` could not be resolved")]
    Unresolved(String),

    #[error("`{0}` is ambiguous")]
    Ambiguous(String),

    #[error("resolver failure for `{name}`: {message}")]
    Failed { name: String, message: String },
}

/// Maps references found in declarations to their declaring types.
pub trait SymbolResolver: Send + Sync {
    fn resolve_type(&self, reference: &TypeReference) -> Result<QualifiedName, ResolutionError>;

    fn resolve_call(&self, call: &MethodCall) -> Result<MethodTarget, ResolutionError>;

    fn resolve_creation(&self, creation: &ObjectCreation) -> Result<MethodTarget, ResolutionError>;
}

/// Reads the resolutions the parser already recorded on each reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredResolver;

impl SymbolResolver for DeclaredResolver {
    fn resolve_type(&self, reference: &TypeReference) -> Result<QualifiedName, ResolutionError> {
        match &reference.resolution {
            Resolution::Resolved(name) => Ok(name.clone()),
            Resolution::Unresolved => Err(ResolutionError::Unresolved(reference.name.clone())),
        }
    }

    fn resolve_call(&self, call: &MethodCall) -> Result<MethodTarget, ResolutionError> {
        match &call.resolution {
            CallResolution::Resolved(target) => Ok(target.clone()),
            CallResolution::Unresolved => Err(ResolutionError::Unresolved(call.name.clone())),
        }
    }

    fn resolve_creation(&self, creation: &ObjectCreation) -> Result<MethodTarget, ResolutionError> {
        match &creation.resolution {
            CallResolution::Resolved(target) => Ok(target.clone()),
            CallResolution::Unresolved => {
                Err(ResolutionError::Unresolved(creation.type_ref.name.clone()))
            }
        }
    }
}
