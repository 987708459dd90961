//! Property tests: board invariants hold after every command in random sequences.

use car_parking_core::{Command, Direction, Event, VehicleId, VehicleSnapshot};
use car_parking_world::{apply, levels, query, PuzzleEngine};
use proptest::prelude::*;

fn assert_board_consistent(engine: &PuzzleEngine) {
    let grid_size = query::grid_size(engine);
    let snapshots: Vec<VehicleSnapshot> = query::vehicle_view(engine).into_vec();

    for (index, snapshot) in snapshots.iter().enumerate() {
        assert!(
            snapshot.footprint().fits_within(grid_size),
            "vehicle {} left the board",
            snapshot.id.get()
        );
        for other in &snapshots[index + 1..] {
            assert!(
                !snapshot.footprint().intersects(&other.footprint()),
                "vehicles {} and {} overlap",
                snapshot.id.get(),
                other.id.get()
            );
        }
    }
}

fn command_strategy() -> impl Strategy<Value = Command> {
    let direction = prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ];
    prop_oneof![
        8 => (0_u32..5, direction).prop_map(|(vehicle, direction)| Command::AttemptMove {
            vehicle: VehicleId::new(vehicle),
            direction,
        }),
        2 => Just(Command::Undo),
        1 => Just(Command::Reset),
    ]
}

proptest! {
    #[test]
    fn random_command_sequences_preserve_invariants(
        commands in prop::collection::vec(command_strategy(), 0..200)
    ) {
        let mut engine = PuzzleEngine::create(levels::easy()).expect("valid level");
        let initial = query::vehicle_view(&engine);
        let mut events = Vec::new();
        let mut solved = false;

        for command in commands {
            events.clear();
            apply(&mut engine, command, &mut events);
            assert_board_consistent(&engine);

            prop_assert_eq!(query::history(&engine).len() as u32, query::move_count(&engine));
            prop_assert!(query::forward_moves(&engine) >= query::move_count(&engine));

            if command == Command::Reset {
                prop_assert_eq!(query::vehicle_view(&engine), initial.clone());
                solved = false;
            }
            if events.iter().any(|event| matches!(event, Event::PuzzleSolved { .. })) {
                solved = true;
            }
            prop_assert_eq!(engine.is_solved(), solved, "solved latch drifted");
        }
    }

    #[test]
    fn move_then_undo_is_identity(vehicle in 0_u32..4, direction_index in 0_usize..4) {
        let direction = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ][direction_index];
        let mut engine = PuzzleEngine::create(levels::easy()).expect("valid level");
        let before = query::vehicle_view(&engine);

        let outcome = engine
            .attempt_move(VehicleId::new(vehicle), direction)
            .expect("vehicle exists");
        if outcome.is_applied() {
            prop_assert_eq!(engine.move_count(), 1);
            prop_assert!(engine.undo().is_some());
        }

        prop_assert_eq!(query::vehicle_view(&engine), before);
        prop_assert_eq!(engine.move_count(), 0);
    }
}
