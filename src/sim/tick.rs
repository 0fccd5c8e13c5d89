//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically. Order within a
//! tick is fixed: player, adversaries (in list order), collisions,
//! collectibles, then the end-of-game check.

use super::adversary::AdversaryMode;
use super::motion::Direction;
use super::player::PlayerView;
use super::state::{GameEvent, GameSession, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Heading to buffer for the player
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
}

/// Apply input and advance the session by one timestep
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.pause {
        session.toggle_pause();
    }
    if let Some(dir) = input.direction {
        session.request_direction(dir);
    }
    session.update(dt);
}

impl GameSession {
    /// Advance the simulation by `dt` seconds; a no-op unless playing
    pub fn update(&mut self, dt: f32) {
        if self.state != GameState::Playing {
            return;
        }
        debug_assert!(dt >= 0.0, "negative timestep {dt}");
        let dt = dt.max(0.0);
        self.time_ticks += 1;

        self.player.update(dt, &self.maze);

        // Every adversary sees the player where it ended up this tick
        for adversary in &mut self.adversaries {
            adversary.update(dt, &self.maze, &self.player, &mut self.rng);
        }

        self.resolve_collisions();
        self.collect_at_player();
        self.check_game_end();
        self.debug_check_bounds();
    }

    fn resolve_collisions(&mut self) {
        for i in 0..self.adversaries.len() {
            let adversary = &mut self.adversaries[i];
            if adversary.pos.distance(self.player.pos) >= self.settings.collision_distance {
                continue;
            }

            match adversary.mode {
                AdversaryMode::Frightened => {
                    let personality = adversary.personality;
                    adversary.reset();
                    let points = self.settings.adversary_eaten_score;
                    self.score += points;
                    self.events.push(GameEvent::AdversaryEaten { personality, points });
                    log::debug!("Ate {personality:?} for {points}");
                }
                // Eyes heading home are harmless
                AdversaryMode::Eaten => {}
                AdversaryMode::Chase | AdversaryMode::Scatter => {
                    // Everything resets on a life loss, so nothing further can touch the player
                    self.lose_life();
                    return;
                }
            }
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });
        log::info!("Life lost, {} left", self.lives);

        if self.lives > 0 {
            self.player.reset();
            for adversary in &mut self.adversaries {
                adversary.reset();
            }
        }
    }

    fn collect_at_player(&mut self) {
        let cell = self.player.grid_cell();

        if self.maze.collect_pellet(cell.x, cell.y) {
            self.score += self.settings.pellet_score;
            self.events.push(GameEvent::PelletCollected { cell });
        }

        if self.maze.collect_power_pellet(cell.x, cell.y) {
            self.score += self.settings.power_pellet_score;
            for adversary in &mut self.adversaries {
                adversary.frighten();
            }
            self.events.push(GameEvent::PowerPelletCollected { cell });
            log::debug!("Power pellet at {cell:?}");
        }
    }

    fn check_game_end(&mut self) {
        // Running out of lives wins over clearing the board on the same tick
        if self.lives == 0 {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!("Game over, final score {}", self.score);
        } else if self.maze.all_collected() {
            self.state = GameState::Victory;
            self.events.push(GameEvent::Victory);
            log::info!("Board cleared, final score {}", self.score);
        }
    }

    fn debug_check_bounds(&self) {
        let (w, h) = (self.maze.width() as f32, self.maze.height() as f32);
        let in_bounds = |p: glam::Vec2| p.x >= 0.0 && p.x < w && p.y >= 0.0 && p.y < h;
        debug_assert!(
            in_bounds(self.player.pos),
            "player out of bounds at {:?}",
            self.player.pos
        );
        for adversary in &self.adversaries {
            debug_assert!(
                in_bounds(adversary.pos),
                "{:?} out of bounds at {:?}",
                adversary.personality,
                adversary.pos
            );
        }
    }
}
