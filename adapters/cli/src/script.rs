//! Parser for move scripts such as `2:down, 2:down, 0:right undo`.

use anyhow::{bail, Context, Result};
use car_parking_core::{Command, Direction, VehicleId};

/// Parses a comma- or whitespace-separated move script into commands.
pub(crate) fn parse(script: &str) -> Result<Vec<Command>> {
    script
        .split(|character: char| character == ',' || character.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| parse_token(token).with_context(|| format!("invalid script token `{token}`")))
        .collect()
}

fn parse_token(token: &str) -> Result<Command> {
    match token.to_ascii_lowercase().as_str() {
        "undo" => return Ok(Command::Undo),
        "reset" => return Ok(Command::Reset),
        _ => {}
    }

    let Some((vehicle, direction)) = token.split_once(':') else {
        bail!("expected `<vehicle>:<direction>`, `undo` or `reset`");
    };
    let vehicle = vehicle
        .trim()
        .parse::<u32>()
        .context("vehicle must be a non-negative integer")?;
    let direction_name = direction.trim().to_ascii_lowercase();
    let Some(direction) = Direction::from_name(&direction_name) else {
        bail!("unknown direction `{direction_name}`");
    };

    Ok(Command::AttemptMove {
        vehicle: VehicleId::new(vehicle),
        direction,
    })
}
