//! Single-line share codes for level definitions.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use car_parking_core::{CellCoord, LevelDefinition, VehicleSpec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CODE_DOMAIN: &str = "park";
const CODE_VERSION: &str = "v1";
const FIELD_DELIMITER: &str = ":";

/// Encodes a level into a string suitable for clipboard transfer.
pub(crate) fn encode(level: &LevelDefinition) -> Result<String, serde_json::Error> {
    let payload = SerializableLevel {
        name: level.name.clone(),
        vehicles: level.vehicles.clone(),
        exit: level.exit,
        perfect_moves: level.perfect_moves,
    };
    let json = serde_json::to_vec(&payload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    let size = level.grid_size;
    let dimensions = format!("{size}x{size}");
    Ok([CODE_DOMAIN, CODE_VERSION, dimensions.as_str(), encoded.as_str()].join(FIELD_DELIMITER))
}

/// Decodes a level from its share code.
pub(crate) fn decode(value: &str) -> Result<LevelDefinition, LevelTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LevelTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(LevelTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(LevelTransferError::MissingVersion)?;
    let dimensions = parts.next().ok_or(LevelTransferError::MissingDimensions)?;
    let payload = parts.next().ok_or(LevelTransferError::MissingPayload)?;

    if domain != CODE_DOMAIN {
        return Err(LevelTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != CODE_VERSION {
        return Err(LevelTransferError::UnsupportedVersion(version.to_owned()));
    }

    let grid_size = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(LevelTransferError::InvalidEncoding)?;
    let decoded: SerializableLevel =
        serde_json::from_slice(&bytes).map_err(LevelTransferError::InvalidPayload)?;

    Ok(LevelDefinition {
        name: decoded.name,
        grid_size,
        vehicles: decoded.vehicles,
        exit: decoded.exit,
        perfect_moves: decoded.perfect_moves,
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableLevel {
    name: String,
    vehicles: Vec<VehicleSpec>,
    exit: CellCoord,
    perfect_moves: u32,
}

/// Reasons a share code cannot be turned back into a level.
#[derive(Debug, Error)]
pub(crate) enum LevelTransferError {
    /// Nothing but whitespace was supplied.
    #[error("share code was empty")]
    EmptyPayload,
    #[error("share code is missing the `park` prefix")]
    MissingPrefix,
    #[error("share code is missing the version")]
    MissingVersion,
    #[error("share code is missing the grid size")]
    MissingDimensions,
    #[error("share code is missing the level payload")]
    MissingPayload,
    #[error("share code prefix `{0}` is not `park`")]
    InvalidPrefix(String),
    #[error("share code version `{0}` is not supported")]
    UnsupportedVersion(String),
    /// Grid sizes must read `NxN` with a non-zero `N`.
    #[error("grid size `{0}` is not a square `NxN` board")]
    InvalidDimensions(String),
    #[error("level payload is not valid base64")]
    InvalidEncoding(#[source] base64::DecodeError),
    #[error("level payload is not a valid level")]
    InvalidPayload(#[source] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<u32, LevelTransferError> {
    let invalid = || LevelTransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    if columns == 0 || columns != rows {
        return Err(invalid());
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_parking_world::levels;

    #[test]
    fn easy_level_survives_a_share_code() {
        let level = levels::easy();

        let code = encode(&level).expect("level encodes");
        assert!(code.starts_with("park:v1:6x6:"));

        let decoded = decode(&code).expect("code decodes");
        assert_eq!(decoded, level);
    }

    #[test]
    fn rectangular_grids_are_refused() {
        let code = encode(&levels::easy()).expect("level encodes");
        let tampered = code.replacen(":6x6:", ":6x5:", 1);
        assert!(matches!(
            decode(&tampered),
            Err(LevelTransferError::InvalidDimensions(dimensions)) if dimensions == "6x5"
        ));
    }

    #[test]
    fn foreign_prefixes_are_refused() {
        assert!(matches!(
            decode("maze:v1:6x6:e30"),
            Err(LevelTransferError::InvalidPrefix(prefix)) if prefix == "maze"
        ));
        assert!(matches!(
            decode("park:v2:6x6:e30"),
            Err(LevelTransferError::UnsupportedVersion(version)) if version == "v2"
        ));
        assert!(matches!(decode("   "), Err(LevelTransferError::EmptyPayload)));
        assert!(matches!(
            decode("park:v1"),
            Err(LevelTransferError::MissingDimensions)
        ));
    }

    #[test]
    fn corrupt_payloads_keep_their_cause() {
        use std::error::Error as _;

        let error = decode("park:v1:6x6:not base64!").expect_err("bad base64");
        assert!(matches!(error, LevelTransferError::InvalidEncoding(_)));
        assert_eq!(error.to_string(), "level payload is not valid base64");
        assert!(error.source().is_some());

        let not_a_level = STANDARD_NO_PAD.encode(b"[1,2,3]");
        let error = decode(&format!("park:v1:6x6:{not_a_level}")).expect_err("wrong json shape");
        assert!(matches!(error, LevelTransferError::InvalidPayload(_)));
        assert!(error.source().is_some());
    }
}
