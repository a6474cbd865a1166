//! Game mode policies for Offkey.
//!
//! A mode decides two things at game start: whether the host's custom
//! prompt list is accepted, and which static list backs the mode when no
//! usable custom list is given. The prompt-distribution algorithm itself
//! ([`assign_prompts`]) is shared across modes.
//!
//! # Key items
//!
//! - [`GameMode`] — the mode identifiers and their policy flags
//! - [`assign_prompts`] — the start-game sampling algorithm
//! - [`parse_input_list`] — comma-separated custom list parsing
//! - [`ModeError`] — policy faults (unknown mode, pool too small)

mod catalog;
mod error;
mod policy;

pub use catalog::DEFAULT_SONG_LIST;
pub use error::ModeError;
pub use policy::{assign_prompts, parse_input_list, sample_prompts, GameMode};
