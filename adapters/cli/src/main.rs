#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the car parking puzzle.

mod board;
mod level_source;
mod level_transfer;
mod script;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use car_parking_core::{CellCoord, Event, MoveRejection, PuzzleReport};
use car_parking_system_controls::{ControlInput, Controls, Key};
use car_parking_system_scoring::Scoring;
use car_parking_world::{self as world, levels, query, PuzzleEngine};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::level_source::LevelSource;

/// Slide the blocking cars aside and drive the target car out of the car park.
#[derive(Parser, Debug)]
#[command(name = "car-parking", version)]
struct Cli {
    /// Log engine activity at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List the built-in levels.
    Levels,
    /// Print a level's starting board.
    Show {
        #[command(flatten)]
        source: LevelSource,
    },
    /// Replay a move script and report the result.
    Play {
        #[command(flatten)]
        source: LevelSource,
        /// Moves such as `2:down 2:down 0:right 0:right`; `undo` and `reset` are accepted too.
        #[arg(long, default_value = "")]
        moves: String,
    },
    /// Play from standard input with clicks and key names.
    Interactive {
        #[command(flatten)]
        source: LevelSource,
    },
    /// Print a share code for a level.
    Export {
        #[command(flatten)]
        source: LevelSource,
    },
}

/// Entry point for the car parking command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        CliCommand::Levels => {
            for level in levels::catalog() {
                println!(
                    "{} ({}x{}, perfect in {} moves)",
                    level.name, level.grid_size, level.grid_size, level.perfect_moves
                );
            }
            Ok(())
        }
        CliCommand::Show { source } => {
            let engine = load_engine(&source)?;
            print_board(&engine);
            Ok(())
        }
        CliCommand::Play { source, moves } => play(&source, &moves),
        CliCommand::Interactive { source } => interactive(&source),
        CliCommand::Export { source } => {
            let level = source.load()?;
            let _ = PuzzleEngine::create(level.clone()).context("level failed validation")?;
            println!("{}", level_transfer::encode(&level).context("failed to encode level")?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_engine(source: &LevelSource) -> Result<PuzzleEngine> {
    let level = source.load()?;
    let name = level.name.clone();
    let engine = PuzzleEngine::create(level)
        .with_context(|| format!("level `{name}` failed validation"))?;
    debug!(level = %name, "level loaded");
    Ok(engine)
}

fn play(source: &LevelSource, moves: &str) -> Result<()> {
    let mut engine = load_engine(source)?;
    let commands = script::parse(moves)?;
    let mut scoring = Scoring::new(query::perfect_moves(&engine));
    let mut reports = Vec::new();
    let mut events = Vec::new();

    for command in commands {
        events.clear();
        world::apply(&mut engine, command, &mut events);
        for event in &events {
            println!("{}", describe(event));
        }
        scoring.handle(&events, &mut reports);
    }

    print_board(&engine);
    print_summary(&engine, scoring.last_report());
    Ok(())
}

fn interactive(source: &LevelSource) -> Result<()> {
    let mut engine = load_engine(source)?;
    let mut controls = Controls::new();
    let mut scoring = Scoring::new(query::perfect_moves(&engine));
    let mut reports = Vec::new();
    let mut pending: Vec<Event> = Vec::new();

    println!("commands: click <column> <row>, up, down, left, right, undo, reset, quit");
    print_board(&engine);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from standard input")?;
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "q") {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        let Some(input) = parse_input(trimmed, query::grid_size(&engine)) else {
            println!("unrecognised input `{trimmed}`");
            continue;
        };

        let view = query::vehicle_view(&engine);
        let mut commands = Vec::new();
        controls.handle(&pending, &view, Some(input), &mut commands);

        pending.clear();
        for command in commands {
            world::apply(&mut engine, command, &mut pending);
        }
        for event in &pending {
            println!("{}", describe(event));
        }
        scoring.handle(&pending, &mut reports);

        if let Some(selected) = controls.selected() {
            println!("selected vehicle {}", selected.get());
        }
        print_board(&engine);
        if engine.is_solved() {
            print_summary(&engine, scoring.last_report());
        }
        io::stdout().flush().context("failed to flush standard output")?;
    }

    Ok(())
}

fn parse_input(line: &str, grid_size: u32) -> Option<ControlInput> {
    let mut words = line.split_whitespace();
    let key = match words.next()? {
        "click" => {
            let column = words.next()?.parse::<u32>().ok()?;
            let row = words.next()?.parse::<u32>().ok()?;
            let cell = (column < grid_size && row < grid_size).then(|| CellCoord::new(column, row));
            return Some(ControlInput::Click { cell });
        }
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "undo" | "u" => Key::Undo,
        "reset" | "r" => Key::Reset,
        _ => return None,
    };
    Some(ControlInput::Key(key))
}

fn describe(event: &Event) -> String {
    match event {
        Event::VehicleMoved { vehicle, from, to } => format!(
            "vehicle {} moved ({}, {}) -> ({}, {})",
            vehicle.get(),
            from.column(),
            from.row(),
            to.column(),
            to.row()
        ),
        Event::MoveRejected {
            vehicle,
            direction,
            reason,
        } => {
            let reason = match reason {
                MoveRejection::WrongAxis => String::from("it does not slide that way"),
                MoveRejection::OutOfBounds => String::from("it would leave the car park"),
                MoveRejection::Blocked { by } => format!("vehicle {} is in the way", by.get()),
                MoveRejection::UnknownVehicle => String::from("there is no such vehicle"),
            };
            format!(
                "vehicle {} cannot move {}: {reason}",
                vehicle.get(),
                direction.name()
            )
        }
        Event::MoveUndone { vehicle, to, .. } => format!(
            "undid move of vehicle {}, back at ({}, {})",
            vehicle.get(),
            to.column(),
            to.row()
        ),
        Event::UndoRejected => String::from("nothing to undo"),
        Event::PuzzleReset => String::from("puzzle reset"),
        Event::PuzzleSolved { move_count } => format!("level solved in {move_count} moves"),
    }
}

fn print_board(engine: &PuzzleEngine) {
    println!(
        "{} - moves: {}",
        query::level_name(engine),
        query::move_count(engine)
    );
    print!("{}", board::render(engine));
    print!("{}", board::legend(engine));
}

fn print_summary(engine: &PuzzleEngine, report: Option<&PuzzleReport>) {
    match report {
        Some(report) => println!(
            "Level complete! {} Moves: {}, stars: {}/3, perfect: {}",
            report.stars.headline(),
            report.move_count,
            report.stars.stars(),
            report.perfect_moves
        ),
        None => println!(
            "Not solved yet after {} moves (perfect: {}).",
            query::move_count(engine),
            query::perfect_moves(engine)
        ),
    }
}
