//! The lobby aggregate and its members.

use offkey_modes::GameMode;
use offkey_protocol::{GameSettings, LobbyCode, LobbySnapshot, PlayerInfo};

use crate::LobbyError;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One member of a lobby. Owned exclusively by its [`Lobby`].
#[derive(Debug, Clone)]
pub struct Player {
    /// Unique within the owning lobby, case-sensitive, immutable for the
    /// life of the membership.
    pub nickname: String,
    /// Set at game start for modes that distribute prompts.
    pub assigned_prompt: Option<String>,
    /// Pre-start readiness flag, reserved for the host screen.
    pub ready: bool,
    /// Reserved ordering field; gameplay assigns it after start.
    pub index: Option<u32>,
}

impl Player {
    /// Creates a fresh member with no prompt and no ordering index.
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            assigned_prompt: None,
            ready: false,
            index: None,
        }
    }

    fn to_info(&self) -> PlayerInfo {
        PlayerInfo {
            nickname: self.nickname.clone(),
            assigned_prompt: self.assigned_prompt.clone(),
            ready: self.ready,
            index: self.index,
        }
    }
}

// ---------------------------------------------------------------------------
// Lobby
// ---------------------------------------------------------------------------

/// The aggregate root for one session: a code-addressed pre-game room.
///
/// Players are kept in join order; nickname lookups scan the list, which
/// is plenty at party-lobby sizes. A lobby never exists with zero players
/// outside the coordinator's atomic remove-then-delete step.
#[derive(Debug, Clone)]
pub struct Lobby {
    code: LobbyCode,
    players: Vec<Player>,
    host: String,
    game_mode: GameMode,
    settings: GameSettings,
    game_started: bool,
    round_index: u32,
    round_num: u32,
    num_rounds: u32,
    rec_list: Vec<String>,
}

impl Lobby {
    /// Creates an empty lobby with the given code and host nickname.
    ///
    /// The host is recorded here but joins the player list through the
    /// same [`insert_player`](Self::insert_player) path as everyone else.
    pub fn new(code: LobbyCode, host: impl Into<String>) -> Self {
        Self {
            code,
            players: Vec::new(),
            host: host.into(),
            game_mode: GameMode::default(),
            settings: GameSettings::default(),
            game_started: false,
            round_index: 1,
            round_num: 1,
            num_rounds: 1,
            rec_list: Vec::new(),
        }
    }

    /// The lobby's code, immutable after creation.
    pub fn code(&self) -> &LobbyCode {
        &self.code
    }

    /// Nickname of the player who created the lobby. Never changes,
    /// even if that player departs.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether the game has started. Monotonic: never goes back.
    pub fn game_started(&self) -> bool {
        self.game_started
    }

    /// Settings recorded at start time.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Round counters as `(round_index, round_num, num_rounds)`. All
    /// start at 1; gameplay advances them after start.
    pub fn round_counters(&self) -> (u32, u32, u32) {
        (self.round_index, self.round_num, self.num_rounds)
    }

    /// Recording metadata accumulated during gameplay. Empty until the
    /// recording flow populates it.
    pub fn rec_list(&self) -> &[String] {
        &self.rec_list
    }

    /// Number of current members.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` when the player list is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns `true` if a member with this exact nickname exists.
    pub fn contains_player(&self, nickname: &str) -> bool {
        self.players.iter().any(|p| p.nickname == nickname)
    }

    /// Adds a member, rejecting nickname collisions.
    pub fn insert_player(&mut self, player: Player) -> Result<(), LobbyError> {
        if self.contains_player(&player.nickname) {
            return Err(LobbyError::NicknameTaken(player.nickname));
        }
        self.players.push(player);
        Ok(())
    }

    /// Removes and returns the member with this nickname, if present.
    pub fn remove_player(&mut self, nickname: &str) -> Option<Player> {
        let pos = self.players.iter().position(|p| p.nickname == nickname)?;
        Some(self.players.remove(pos))
    }

    /// Records the mode and settings chosen at start time.
    ///
    /// Happens unconditionally before prompt work, so a failed prompt
    /// draw still leaves the chosen configuration on the lobby.
    pub fn record_start_config(&mut self, mode: GameMode, settings: GameSettings) {
        self.game_mode = mode;
        self.settings = settings;
    }

    /// Pairs one prompt with each member, in join order.
    ///
    /// The prompt vector comes out of the sampler fully shuffled, so the
    /// pairing is random regardless of join order. Extra prompts are
    /// ignored; missing ones leave trailing players unassigned (callers
    /// sample exactly `player_count()` prompts).
    pub fn assign_prompts(&mut self, prompts: Vec<String>) {
        for (player, prompt) in self.players.iter_mut().zip(prompts) {
            player.assigned_prompt = Some(prompt);
        }
    }

    /// Returns the prompt assigned to this nickname, if any.
    pub fn prompt_for(&self, nickname: &str) -> Option<String> {
        self.players
            .iter()
            .find(|p| p.nickname == nickname)
            .and_then(|p| p.assigned_prompt.clone())
    }

    /// Marks the game as started. Callers guard against double starts;
    /// the flag itself only ever moves false to true.
    pub fn mark_started(&mut self) {
        debug_assert!(!self.game_started, "start transition fires exactly once");
        self.game_started = true;
    }

    /// Produces the wire snapshot broadcast on membership changes.
    pub fn snapshot(&self) -> LobbySnapshot {
        LobbySnapshot {
            lobby: self.code.clone(),
            players: self.players.iter().map(Player::to_info).collect(),
            host: self.host.clone(),
            game_mode: self.game_mode.to_string(),
            settings: self.settings.clone(),
            game_started: self.game_started,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby() -> Lobby {
        Lobby::new(LobbyCode::normalized("A7B2X9"), "Alice")
    }

    #[test]
    fn test_new_lobby_is_empty_and_not_started() {
        let lobby = lobby();
        assert!(lobby.is_empty());
        assert!(!lobby.game_started());
        assert_eq!(lobby.host(), "Alice");
        assert_eq!(lobby.code().as_str(), "A7B2X9");
        assert_eq!(lobby.round_counters(), (1, 1, 1));
        assert!(lobby.rec_list().is_empty());
    }

    #[test]
    fn test_insert_player_rejects_duplicate_nickname() {
        let mut lobby = lobby();
        lobby.insert_player(Player::new("Alice")).unwrap();

        let result = lobby.insert_player(Player::new("Alice"));

        assert!(matches!(result, Err(LobbyError::NicknameTaken(n)) if n == "Alice"));
        assert_eq!(lobby.player_count(), 1, "rejected join must not mutate");
    }

    #[test]
    fn test_nicknames_are_case_sensitive() {
        let mut lobby = lobby();
        lobby.insert_player(Player::new("Alice")).unwrap();
        lobby
            .insert_player(Player::new("alice"))
            .expect("different case is a different nickname");
        assert_eq!(lobby.player_count(), 2);
    }

    #[test]
    fn test_players_keep_join_order() {
        let mut lobby = lobby();
        for name in ["Alice", "Bob", "Carol"] {
            lobby.insert_player(Player::new(name)).unwrap();
        }

        let snapshot = lobby.snapshot();
        let names: Vec<_> = snapshot
            .players
            .iter()
            .map(|p| p.nickname.as_str())
            .collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_remove_player_returns_member() {
        let mut lobby = lobby();
        lobby.insert_player(Player::new("Alice")).unwrap();
        lobby.insert_player(Player::new("Bob")).unwrap();

        let removed = lobby.remove_player("Alice").expect("should remove");
        assert_eq!(removed.nickname, "Alice");
        assert_eq!(lobby.player_count(), 1);
        assert!(lobby.remove_player("Alice").is_none(), "second remove is None");
    }

    #[test]
    fn test_assign_prompts_pairs_in_join_order() {
        let mut lobby = lobby();
        lobby.insert_player(Player::new("Alice")).unwrap();
        lobby.insert_player(Player::new("Bob")).unwrap();

        lobby.assign_prompts(vec!["Song A".into(), "Song B".into()]);

        assert_eq!(lobby.prompt_for("Alice").as_deref(), Some("Song A"));
        assert_eq!(lobby.prompt_for("Bob").as_deref(), Some("Song B"));
        assert_eq!(lobby.prompt_for("Carol"), None);
    }

    #[test]
    fn test_snapshot_reflects_start_state() {
        let mut lobby = lobby();
        lobby.insert_player(Player::new("Alice")).unwrap();
        lobby.record_start_config(
            "CLASSIC".parse().unwrap(),
            GameSettings {
                round_duration: Some(60),
                ..GameSettings::default()
            },
        );
        lobby.mark_started();

        let snapshot = lobby.snapshot();
        assert!(snapshot.game_started);
        assert_eq!(snapshot.game_mode, "CLASSIC");
        assert_eq!(snapshot.settings.round_duration, Some(60));
        // Round counters belong to gameplay; starting leaves them alone.
        assert_eq!(lobby.round_counters(), (1, 1, 1));
        assert!(lobby.rec_list().is_empty());
    }

    #[test]
    fn test_host_identity_survives_host_removal() {
        let mut lobby = lobby();
        lobby.insert_player(Player::new("Alice")).unwrap();
        lobby.insert_player(Player::new("Bob")).unwrap();

        lobby.remove_player("Alice");

        // Host is never migrated implicitly.
        assert_eq!(lobby.host(), "Alice");
    }
}
