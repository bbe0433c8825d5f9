use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use maze_escape_core::{CellCoord, Command, Direction, Event, GameStatus};
use maze_escape_world::{self as world, query, World, WorldConfig};

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(config(11), scripted_commands());
    let second = replay(config(11), scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::MazeGenerated { .. })));
}

#[test]
fn different_seeds_build_different_mazes() {
    let first = World::new(config(1)).expect("world builds");
    let second = World::new(config(2)).expect("world builds");
    assert_ne!(query::grid(&first), query::grid(&second));
}

#[test]
fn commands_after_game_over_are_ignored_until_reset() {
    let mut world = World::new(WorldConfig {
        hint_cost: 1,
        ..config(5)
    })
    .expect("world builds");
    let mut events = Vec::new();

    for _ in 0..2000 {
        if query::status(&world) != GameStatus::Playing {
            break;
        }
        world::apply(&mut world, Command::RequestHint, &mut events).expect("hint");
    }
    assert_ne!(query::status(&world), GameStatus::Playing);

    events.clear();
    for command in scripted_commands().into_iter().take(6) {
        world::apply(&mut world, command, &mut events).expect("command");
    }
    assert!(events.is_empty());

    world::apply(&mut world, Command::Reset, &mut events).expect("reset");
    assert_eq!(events, vec![Event::GameReset]);
    assert_eq!(query::status(&world), GameStatus::Playing);
}

fn config(seed: u64) -> WorldConfig {
    WorldConfig {
        width: 21,
        height: 21,
        seed,
        ..WorldConfig::default()
    }
}

fn replay(config: WorldConfig, commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new(config).expect("world builds");
    let mut events = Vec::new();

    for command in commands {
        world::apply(&mut world, command, &mut events).expect("command applies");
    }

    ReplayOutcome {
        player: query::player(&world),
        enemy: query::enemy_cell(&world),
        status: query::status(&world),
        moves_used: query::move_budget(&world).used(),
        keys: query::features(&world).keys().to_vec(),
        events,
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    let walk = [
        Direction::South,
        Direction::East,
        Direction::South,
        Direction::East,
        Direction::North,
        Direction::West,
    ];
    for direction in walk {
        commands.push(Command::MovePlayer { direction });
        commands.push(Command::Tick);
        commands.push(Command::Tick);
    }
    commands.push(Command::RequestHint);
    commands.push(Command::Reset);
    for _ in 0..12 {
        commands.push(Command::Tick);
    }
    commands.push(Command::NewMaze);
    for direction in walk.iter().rev() {
        commands.push(Command::MovePlayer {
            direction: *direction,
        });
        commands.push(Command::Tick);
    }
    commands
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    player: CellCoord,
    enemy: Option<CellCoord>,
    status: GameStatus,
    moves_used: u32,
    keys: Vec<CellCoord>,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
