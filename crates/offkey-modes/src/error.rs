//! Error types for the mode policy layer.

/// Faults raised while applying a mode policy at game start.
#[derive(Debug, thiserror::Error)]
pub enum ModeError {
    /// The mode string names no known policy.
    #[error("unknown game mode: {0}")]
    UnknownMode(String),

    /// The chosen prompt pool has fewer entries than players.
    ///
    /// Raised before sampling so callers see a policy fault instead of
    /// an out-of-range panic from the sampling primitive.
    #[error("prompt pool too small: {available} prompts for {needed} players")]
    PromptPoolTooSmall { needed: usize, available: usize },
}
