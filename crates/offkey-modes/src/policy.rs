//! Mode identifiers and the prompt-distribution algorithm.

use std::fmt;
use std::str::FromStr;

use crate::{DEFAULT_SONG_LIST, ModeError};

// ---------------------------------------------------------------------------
// GameMode
// ---------------------------------------------------------------------------

/// The game modes a lobby can run.
///
/// Each variant is a strategy: it answers whether the host's custom
/// prompt list is accepted and which static list backs the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Players each get a song title to perform.
    #[default]
    Classic,
    /// Guess the melody from the backing track; prompts come from
    /// gameplay itself, not from a start-time list.
    BlindKaraoke,
}

impl GameMode {
    /// Whether `start_game` should draw per-player prompts from a list.
    pub fn requires_input_list(&self) -> bool {
        match self {
            Self::Classic => true,
            Self::BlindKaraoke => false,
        }
    }

    /// The static list used when the host's custom list is unusable.
    pub fn default_prompts(&self) -> &'static [&'static str] {
        match self {
            Self::Classic => DEFAULT_SONG_LIST,
            Self::BlindKaraoke => &[],
        }
    }
}

impl FromStr for GameMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLASSIC" => Ok(Self::Classic),
            "BLIND_KARAOKE" => Ok(Self::BlindKaraoke),
            other => Err(ModeError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => f.write_str("CLASSIC"),
            Self::BlindKaraoke => f.write_str("BLIND_KARAOKE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt distribution
// ---------------------------------------------------------------------------

/// Parses a raw comma-separated prompt list.
///
/// Entries are trimmed; empty entries (including trailing commas) are
/// dropped.
pub fn parse_input_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Draws `count` prompts uniformly at random, without replacement.
///
/// The result is fully shuffled, so pairing it positionally with the
/// player list yields a random assignment.
pub fn sample_prompts<S: AsRef<str>>(
    pool: &[S],
    count: usize,
) -> Result<Vec<String>, ModeError> {
    if pool.len() < count {
        return Err(ModeError::PromptPoolTooSmall {
            needed: count,
            available: pool.len(),
        });
    }
    let mut rng = rand::rng();
    let picks = rand::seq::index::sample(&mut rng, pool.len(), count);
    Ok(picks
        .into_iter()
        .map(|i| pool[i].as_ref().to_string())
        .collect())
}

/// Runs the start-game prompt policy for a mode.
///
/// For list-requiring modes: parse the host's custom list, fall back to
/// the mode's default list when the custom one has fewer entries than
/// players, then sample one prompt per player. Modes without an input
/// list assign nothing at start.
pub fn assign_prompts(
    mode: GameMode,
    input_list: Option<&str>,
    player_count: usize,
) -> Result<Option<Vec<String>>, ModeError> {
    if !mode.requires_input_list() {
        return Ok(None);
    }

    let custom = input_list.map(parse_input_list).unwrap_or_default();
    let prompts = if custom.len() >= player_count {
        sample_prompts(&custom, player_count)?
    } else {
        if !custom.is_empty() {
            tracing::debug!(
                provided = custom.len(),
                players = player_count,
                "custom list too short, using default catalog"
            );
        }
        sample_prompts(mode.default_prompts(), player_count)?
    };
    Ok(Some(prompts))
}

// =========================================================================
// Tests
// =========================================================================
