//! The coordinator: one event router over all lobby state.

use tokio::sync::Mutex;
use tracing::{debug, info};

use offkey_modes::{GameMode, assign_prompts};
use offkey_protocol::{ConnectionId, GameSettings, LobbyCode, LobbySnapshot, ServerEvent};

use crate::{
    ConnectionRegistry, Gateway, Lobby, LobbyError, LobbyRegistry, Player, generate_code,
};

/// Both registries under one lock. Splitting the struct lets handlers
/// borrow lobbies and connections mutably at the same time.
#[derive(Debug, Default)]
struct Registries {
    lobbies: LobbyRegistry,
    connections: ConnectionRegistry,
}

/// What an exiting connection leaves behind, decided before any
/// mutation or notification runs.
enum ExitAction {
    /// The bound lobby no longer exists; nothing to do.
    LobbyGone,
    /// The departing player hosted a not-yet-started lobby; everyone
    /// goes home.
    Dismantle,
    /// An ordinary departure. `empty` means they were the last member.
    Removed { empty: bool },
}

/// Routes lobby events: join, exit, and game start.
///
/// All state mutation happens here, under a single lock that is held
/// across the gateway notifications each mutation produces. That makes
/// every mutation-plus-broadcast pair atomic with respect to every
/// other, which is what keeps snapshots and membership events ordered.
pub struct Coordinator<G: Gateway> {
    state: Mutex<Registries>,
    gateway: G,
}

impl<G: Gateway> Coordinator<G> {
    /// Creates a coordinator with no lobbies, fanning out through the
    /// given gateway.
    pub fn new(gateway: G) -> Self {
        Self {
            state: Mutex::new(Registries::default()),
            gateway,
        }
    }

    // -----------------------------------------------------------------------
    // Join
    // -----------------------------------------------------------------------

    /// Joins an existing lobby, or creates one when `requested` is blank.
    ///
    /// On success the connection is bound, added to the lobby's room, and
    /// the whole room receives a `lobby_joined` snapshot. Faults leave
    /// every registry untouched.
    pub async fn join_lobby(
        &self,
        conn: ConnectionId,
        user: &str,
        requested: &str,
    ) -> Result<(), LobbyError> {
        let user = user.trim();
        let mut guard = self.state.lock().await;
        let Registries {
            lobbies,
            connections,
        } = &mut *guard;

        let (code, is_host) = if requested.trim().is_empty() {
            let code = generate_code(lobbies)?;
            lobbies.insert(Lobby::new(code.clone(), user));
            info!(%conn, %code, host = %user, "lobby created");
            (code, true)
        } else {
            let code = LobbyCode::normalized(requested);
            // Existence is checked before the nickname, so a bad code
            // always reports LOBBY_NOT_FOUND.
            let lobby = lobbies.get(&code).ok_or(LobbyError::NotFound(code.clone()))?;
            if lobby.contains_player(user) {
                return Err(LobbyError::NicknameTaken(user.to_string()));
            }
            (code, false)
        };

        let lobby = lobbies
            .get_mut(&code)
            .ok_or(LobbyError::NotFound(code.clone()))?;
        lobby.insert_player(Player::new(user))?;
        let snapshot = lobby.snapshot();

        connections.bind(conn, user.to_string(), code.clone());
        info!(%conn, %code, user, is_host, "player joined");

        self.gateway.add_to_room(conn, &code).await;
        self.gateway
            .broadcast(
                &code,
                ServerEvent::LobbyJoined {
                    username: user.to_string(),
                    is_host,
                    snapshot,
                },
            )
            .await;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Exit
    // -----------------------------------------------------------------------

    /// Handles a voluntary leave or a transport disconnect; the two are
    /// indistinguishable once the binding is gone.
    ///
    /// Infallible by design: exits from unbound connections are no-ops,
    /// and every reachable state has a defined teardown.
    pub async fn handle_exit(&self, conn: ConnectionId) {
        let mut guard = self.state.lock().await;
        let Registries {
            lobbies,
            connections,
        } = &mut *guard;

        let Some(identity) = connections.unbind(conn) else {
            debug!(%conn, "exit from unbound connection ignored");
            return;
        };
        let code = identity.lobby;
        let nickname = identity.nickname;

        let action = match lobbies.get_mut(&code) {
            None => ExitAction::LobbyGone,
            Some(lobby) => {
                if !lobby.game_started() && lobby.host() == nickname {
                    ExitAction::Dismantle
                } else {
                    lobby.remove_player(&nickname);
                    ExitAction::Removed {
                        empty: lobby.is_empty(),
                    }
                }
            }
        };

        match action {
            ExitAction::LobbyGone => {
                debug!(%conn, %code, "exit after lobby teardown");
            }
            ExitAction::Dismantle => {
                info!(%conn, %code, host = %nickname, "host left before start, dismantling");
                self.gateway
                    .broadcast(&code, ServerEvent::LobbyDismantled)
                    .await;
                lobbies.remove(&code);
                let evicted = connections.unbind_lobby(&code);
                debug!(%code, evicted, "dismantled lobby bindings dropped");
                self.gateway.drop_room(&code).await;
            }
            ExitAction::Removed { empty } => {
                if empty {
                    info!(%code, "last player left, deleting lobby");
                    lobbies.remove(&code);
                    self.gateway.drop_room(&code).await;
                } else {
                    info!(%conn, %code, user = %nickname, "player left");
                    self.gateway
                        .broadcast(&code, ServerEvent::UserLeft { user: nickname })
                        .await;
                }
            }
        }

        self.gateway.remove_from_room(conn, &code).await;
    }

    // -----------------------------------------------------------------------
    // Start
    // -----------------------------------------------------------------------

    /// Starts the game in a lobby: records the chosen mode and settings,
    /// distributes prompts for modes that use them, and unicasts each
    /// member their personalized `game_start`.
    pub async fn start_game(
        &self,
        conn: ConnectionId,
        lobby_id: &str,
        mode_str: &str,
        settings: GameSettings,
    ) -> Result<(), LobbyError> {
        let code = LobbyCode::normalized(lobby_id);
        let mut guard = self.state.lock().await;
        let Registries {
            lobbies,
            connections,
        } = &mut *guard;

        let caller = connections.lookup(conn).cloned();
        let lobby = lobbies
            .get_mut(&code)
            .ok_or(LobbyError::NotFound(code.clone()))?;

        let authorized = caller
            .as_ref()
            .is_some_and(|id| id.lobby == code && id.nickname == lobby.host());
        if !authorized {
            return Err(LobbyError::NotHost);
        }
        if lobby.game_started() {
            return Err(LobbyError::AlreadyStarted(code));
        }

        let mode: GameMode = mode_str.parse()?;
        lobby.record_start_config(mode, settings.clone());

        let prompts = assign_prompts(
            mode,
            lobby.settings().input_list.as_deref(),
            lobby.player_count(),
        )?;
        if let Some(prompts) = prompts {
            lobby.assign_prompts(prompts);
        }
        lobby.mark_started();
        info!(%conn, %code, %mode, players = lobby.player_count(), "game started");

        for (member_conn, nickname) in connections.members_of(&code) {
            let assigned_prompt = lobby.prompt_for(&nickname);
            self.gateway
                .unicast(
                    member_conn,
                    ServerEvent::GameStart {
                        game_mode: mode.to_string(),
                        settings: settings.clone(),
                        assigned_prompt,
                    },
                )
                .await;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    /// Number of live lobbies.
    pub async fn lobby_count(&self) -> usize {
        self.state.lock().await.lobbies.len()
    }

    /// Number of bound connections.
    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }

    /// A point-in-time view of one lobby, if it exists.
    pub async fn snapshot(&self, code: &LobbyCode) -> Option<LobbySnapshot> {
        self.state.lock().await.lobbies.get(code).map(Lobby::snapshot)
    }
}
