use thiserror::Error;

use crate::pointer::HitToken;

/// Errors raised by the navigation core.
///
/// Only `InvalidOrbitParameters` is fatal; the other two are absorbed and
/// logged by the component that hits them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FolioError {
    #[error("unknown or unregistered view: {0}")]
    InvalidView(String),
    #[error("invalid orbit parameters for {target}: {reason}")]
    InvalidOrbitParameters { target: String, reason: String },
    #[error("hit-test target {0:?} is not registered")]
    RegistryInconsistency(HitToken),
}

pub type Result<T> = std::result::Result<T, FolioError>;
