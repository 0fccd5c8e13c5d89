//! Game session and core simulation types
//!
//! `GameSession` owns the maze, the player and every adversary for the
//! lifetime of a run. Front ends talk to it through `set_direction`,
//! `toggle_pause` and `update`, and read its public fields (or a
//! [`Snapshot`]) back for drawing.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::adversary::{Adversary, AdversaryMode, Personality};
use super::maze::Maze;
use super::motion::Direction;
use super::player::Player;
use crate::consts::PLAYER_START;
use crate::settings::Settings;

/// Overall state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Active gameplay
    #[default]
    Playing,
    /// Game is paused; ticks are ignored
    Paused,
    /// Out of lives (terminal until restart)
    GameOver,
    /// Every collectible eaten (terminal until restart)
    Victory,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::GameOver | GameState::Victory)
    }
}

/// Things that happened during a tick, for sound/UI hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletCollected { cell: IVec2 },
    PowerPelletCollected { cell: IVec2 },
    AdversaryEaten { personality: Personality, points: u64 },
    LifeLost { lives_left: u8 },
    Paused,
    Resumed,
    Victory,
    GameOver,
}

/// Complete game session (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub state: GameState,
    pub score: u64,
    pub lives: u8,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub maze: Maze,
    pub player: Player,
    /// Updated in list order every tick
    pub adversaries: Vec<Adversary>,
    /// Drives frightened wandering
    pub(super) rng: Pcg32,
    pub(super) events: Vec<GameEvent>,
}

impl GameSession {
    /// Reference maze, default settings, four adversaries
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    /// Reference maze and adversaries with custom tuning
    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        let adversaries = Personality::ALL
            .iter()
            .map(|&p| Adversary::reference(p, &settings))
            .collect();
        let player_start = IVec2::new(PLAYER_START.0, PLAYER_START.1);
        Self::with_layout(Maze::reference(), player_start, adversaries, settings, seed)
    }

    /// Fully custom session
    pub fn with_layout(
        maze: Maze,
        player_start: IVec2,
        adversaries: Vec<Adversary>,
        settings: Settings,
        seed: u64,
    ) -> Self {
        log::info!(
            "New session: seed={seed}, maze={}x{}, adversaries={}, difficulty={}",
            maze.width(),
            maze.height(),
            adversaries.len(),
            settings.difficulty.as_str()
        );
        Self {
            seed,
            state: GameState::Playing,
            score: 0,
            lives: settings.starting_lives,
            time_ticks: 0,
            maze,
            player: Player::new(player_start, settings.player_speed),
            adversaries,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            settings,
        }
    }

    /// Buffer a player heading from a unit delta (ignored unless playing)
    pub fn set_direction(&mut self, dx: i32, dy: i32) {
        if self.state == GameState::Playing {
            self.player.set_direction(dx, dy);
        }
    }

    /// Buffer a player heading (ignored unless playing)
    pub fn request_direction(&mut self, dir: Direction) {
        if self.state == GameState::Playing {
            self.player.request(dir);
        }
    }

    /// Toggle between playing and paused; terminal states are unaffected
    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Playing => {
                self.state = GameState::Paused;
                self.events.push(GameEvent::Paused);
                log::info!("Paused");
            }
            GameState::Paused => {
                self.state = GameState::Playing;
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            GameState::GameOver | GameState::Victory => {}
        }
    }

    /// Start a fresh run with the same seed, layout and settings
    pub fn restart(&mut self) {
        self.maze.reset();
        self.player.reset();
        self.player.animation_phase = 0.0;
        for adversary in &mut self.adversaries {
            adversary.reset();
        }
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.time_ticks = 0;
        self.state = GameState::Playing;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.events.clear();
        log::info!("Restarted (seed={})", self.seed);
    }

    /// Pellets and power pellets still on the board
    pub fn remaining_collectibles(&self) -> usize {
        self.maze.remaining()
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Everything a renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            score: self.score,
            lives: self.lives,
            remaining: self.maze.remaining(),
            player: PlayerSnapshot {
                pos: self.player.pos,
                direction: self.player.direction,
                animation_phase: self.player.animation_phase,
            },
            adversaries: self
                .adversaries
                .iter()
                .map(|a| AdversarySnapshot {
                    personality: a.personality,
                    color: a.personality.color(),
                    pos: a.pos,
                    mode: a.mode,
                    mode_timer: a.mode_timer,
                    blinking: a.frightened_expiring(),
                })
                .collect(),
        }
    }
}

/// Read-only view of a session for renderers and logs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: GameState,
    pub score: u64,
    pub lives: u8,
    pub remaining: usize,
    pub player: PlayerSnapshot,
    pub adversaries: Vec<AdversarySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub pos: Vec2,
    pub direction: Option<Direction>,
    pub animation_phase: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdversarySnapshot {
    pub personality: Personality,
    pub color: &'static str,
    pub pos: Vec2,
    pub mode: AdversaryMode,
    pub mode_timer: f32,
    /// Frightened and about to recover
    pub blinking: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    #[test]
    fn test_new_session() {
        let session = GameSession::new(12345);
        assert_eq!(session.state, GameState::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.adversaries.len(), 4);
        assert_eq!(session.player.pos, Vec2::new(13.0, 17.0));
        assert!(session.maze.can_move_to(13, 17));
        assert_eq!(session.remaining_collectibles(), session.maze.remaining());
    }

    #[test]
    fn test_with_settings_applies_tuning() {
        let settings = Settings::from_preset(Difficulty::Hard);
        let session = GameSession::with_settings(settings.clone(), 1);
        assert_eq!(session.lives, 2);
        assert!(
            session
                .adversaries
                .iter()
                .all(|a| a.speed == settings.adversary_speed)
        );
    }

    #[test]
    fn test_toggle_pause() {
        let mut session = GameSession::new(1);
        session.toggle_pause();
        assert_eq!(session.state, GameState::Paused);
        session.toggle_pause();
        assert_eq!(session.state, GameState::Playing);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Paused, GameEvent::Resumed]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_pause_ignored_in_terminal_states() {
        let mut session = GameSession::new(1);
        session.state = GameState::Victory;
        session.toggle_pause();
        assert_eq!(session.state, GameState::Victory);
        assert!(session.state.is_terminal());
    }

    #[test]
    fn test_set_direction_only_while_playing() {
        let mut session = GameSession::new(1);
        session.toggle_pause();
        session.set_direction(-1, 0);
        assert_eq!(session.player.requested, None);

        session.toggle_pause();
        session.set_direction(-1, 0);
        assert_eq!(session.player.requested, Some(Direction::Left));
    }

    #[test]
    fn test_restart_restores_everything() {
        let mut session = GameSession::new(9);
        session.score = 990;
        session.lives = 0;
        session.state = GameState::GameOver;
        session.maze.collect_pellet(1, 1);
        session.player.pos = Vec2::new(3.0, 3.0);
        session.player.animation_phase = 42.0;
        session.adversaries[0].frighten();

        session.restart();
        assert_eq!(session.state, GameState::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.remaining_collectibles(), Maze::reference().remaining());
        assert_eq!(session.player.pos, Vec2::new(13.0, 17.0));
        assert_eq!(session.adversaries[0].mode, AdversaryMode::Chase);
        assert_eq!(session.snapshot(), GameSession::new(9).snapshot());
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(5);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.adversaries.len(), 4);
        assert_eq!(snapshot.adversaries[1].color, "#ffb8ff");
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"Playing\""));
        assert!(json.contains("\"Chase\""));
    }
}
