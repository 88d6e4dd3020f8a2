//! Error types.

use thiserror::Error;

/// Errors raised while constructing or configuring a ruler.
///
/// Runtime event handling never fails; irrelevant events are ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulerError {
    /// The drawing surface cannot host a ruler.
    #[error("invalid surface: {reason}")]
    InvalidSurface {
        /// Why the surface was rejected.
        reason: &'static str,
    },
    /// A key chord could not be parsed.
    #[error("invalid key chord `{chord}`")]
    InvalidKey {
        /// The rejected chord text.
        chord: String,
    },
}
