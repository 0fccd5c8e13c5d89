//! Maze Chase headless driver
//!
//! Runs a session with an autopilot at a steady 60 Hz frame rate, logs game
//! events and prints the final board plus a JSON snapshot.
//!
//! Usage: `maze-chase [seed] [seconds] [easy|normal|hard]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use maze_chase::sim::{Cell, Direction, FixedStep, GameSession, Personality, TickInput};
use maze_chase::{Difficulty, SimResult, Settings, cell_of};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Autopilot picks a new heading this often (seconds)
const AUTOPILOT_PERIOD: f32 = 0.75;

fn main() -> SimResult<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = parse_arg(args.next(), "seed", 12345u64);
    let seconds = parse_arg(args.next(), "seconds", 60.0f32);
    let difficulty = match args.next() {
        Some(name) => Difficulty::from_str(&name).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {name:?}, using normal");
            Difficulty::Normal
        }),
        None => Difficulty::Normal,
    };

    let settings = Settings::from_preset(difficulty);
    settings.validate()?;
    log::info!("Maze Chase (headless) starting: seed={seed}, {seconds}s, {}", difficulty.as_str());

    let mut session = GameSession::with_settings(settings, seed);
    let mut stepper = FixedStep::new();
    let mut autopilot = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let mut input = TickInput::default();
    let mut since_turn = AUTOPILOT_PERIOD;

    let frames = (seconds.max(0.0) / FRAME_DT) as u64;
    for _ in 0..frames {
        since_turn += FRAME_DT;
        if since_turn >= AUTOPILOT_PERIOD || session.player.direction.is_none() {
            input.direction = Some(Direction::ALL[autopilot.random_range(0..4)]);
            since_turn = 0.0;
        }

        stepper.drive(&mut session, &input, FRAME_DT);

        for event in session.drain_events() {
            log::info!("[tick {}] {event:?}", session.time_ticks);
        }
        if session.state.is_terminal() {
            break;
        }
    }

    println!("{}", render_board(&session));
    println!(
        "state={:?} score={} lives={} remaining={} ticks={}",
        session.state,
        session.score,
        session.lives,
        session.remaining_collectibles(),
        session.time_ticks
    );
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, name: &str, default: T) -> T {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Could not parse {name} from {raw:?}, using default");
            default
        }),
        None => default,
    }
}

/// Text view of the board: walls `#`, pellets `.`, power pellets `o`,
/// the player `@` and adversaries by initial
fn render_board(session: &GameSession) -> String {
    let mut grid: Vec<Vec<char>> = session
        .maze
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Wall => '#',
                    Cell::Pellet => '.',
                    Cell::PowerPellet => 'o',
                    Cell::Empty => ' ',
                })
                .collect()
        })
        .collect();

    let mut put = |pos: glam::Vec2, ch: char| {
        let cell = cell_of(pos);
        if let Some(slot) = usize::try_from(cell.y)
            .ok()
            .and_then(|y| grid.get_mut(y))
            .and_then(|row| usize::try_from(cell.x).ok().and_then(|x| row.get_mut(x)))
        {
            *slot = ch;
        }
    };

    for adversary in &session.adversaries {
        let ch = match adversary.personality {
            Personality::Red => 'R',
            Personality::Pink => 'P',
            Personality::Cyan => 'C',
            Personality::Orange => 'O',
        };
        put(adversary.pos, ch);
    }
    put(session.player.pos, '@');

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
