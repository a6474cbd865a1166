//! Lobby code generation.

use rand::Rng;

use offkey_protocol::{CODE_LEN, LobbyCode};

use crate::{LobbyError, LobbyRegistry};

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Collision-retry bound. At 36^6 (~2.2 billion) possible codes the odds
/// of hitting this with any realistic registry are astronomical, so
/// reaching it means something is broken and we fail loudly.
const MAX_ATTEMPTS: usize = 1000;

/// Generates a fresh 6-character code like `A7B2X9`, collision-checked
/// against every live lobby.
pub fn generate_code(registry: &LobbyRegistry) -> Result<LobbyCode, LobbyError> {
    let mut rng = rand::rng();
    for _ in 0..MAX_ATTEMPTS {
        let candidate: String = (0..CODE_LEN)
            .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
            .collect();
        let code = LobbyCode::from_generated(candidate);
        if !registry.contains(&code) {
            return Ok(code);
        }
    }
    Err(LobbyError::CodeSpaceExhausted)
}
