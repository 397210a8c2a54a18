use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while building or feeding a simulation.
///
/// Ticking never fails: degenerate geometry is skipped and stray grid
/// lookups are clamped. Only catalog, configuration and user input is checked.
#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration value is out of its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A fluid record violates a catalog invariant.
    #[error("invalid fluid {key}: {reason}")]
    InvalidFluid { key: String, reason: String },

    /// A fluid key that is not present in the catalog.
    #[error("unknown fluid: {0}")]
    UnknownFluid(String),

    /// Paired states do not form closed 2-cycles.
    #[error("invalid pairing: {0}")]
    Pairing(String),

    /// A particle added at runtime with non-finite state.
    #[error("invalid particle: {0}")]
    InvalidParticle(String),

    /// Malformed JSON config or catalog.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
