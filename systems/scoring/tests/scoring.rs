use car_parking_core::{Command, Direction, PuzzleReport, StarRating, VehicleId};
use car_parking_system_scoring::Scoring;
use car_parking_world::{self as world, levels, query, PuzzleEngine};

fn drive(
    engine: &mut PuzzleEngine,
    scoring: &mut Scoring,
    commands: &[Command],
) -> Vec<PuzzleReport> {
    let mut reports = Vec::new();
    for command in commands {
        let mut events = Vec::new();
        world::apply(engine, *command, &mut events);
        scoring.handle(&events, &mut reports);
    }
    reports
}

fn step(vehicle: u32, direction: Direction) -> Command {
    Command::AttemptMove {
        vehicle: VehicleId::new(vehicle),
        direction,
    }
}

#[test]
fn report_matches_engine_at_the_moment_of_solve() {
    let mut engine = PuzzleEngine::create(levels::easy()).expect("valid level");
    let mut scoring = Scoring::new(query::perfect_moves(&engine));

    let reports = drive(
        &mut engine,
        &mut scoring,
        &[
            step(0, Direction::Left),
            step(2, Direction::Down),
            step(2, Direction::Down),
            step(0, Direction::Right),
            step(0, Direction::Right),
            step(0, Direction::Right),
        ],
    );

    assert_eq!(
        reports,
        vec![PuzzleReport {
            move_count: 6,
            stars: StarRating::Two,
            perfect_moves: 4,
        }]
    );
    assert_eq!(engine.report(), reports.first().copied());
}

#[test]
fn moves_after_the_solve_do_not_publish_again() {
    let mut engine = PuzzleEngine::create(levels::easy()).expect("valid level");
    let mut scoring = Scoring::new(query::perfect_moves(&engine));

    let reports = drive(
        &mut engine,
        &mut scoring,
        &[
            step(2, Direction::Down),
            step(2, Direction::Down),
            step(0, Direction::Right),
            step(0, Direction::Right),
            Command::Undo,
            step(0, Direction::Right),
        ],
    );

    assert_eq!(reports.len(), 1, "the solve latch publishes exactly once");
    assert_eq!(reports[0].stars, StarRating::Three);
}
