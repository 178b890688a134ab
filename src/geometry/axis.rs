//! Up-axis remapping
//!
//! Changing which world axis points "up" is always a signed permutation of
//! the coordinates, so the six directed cases are stored as constant
//! matrices and applied by lookup.

use std::fmt;
use std::str::FromStr;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{invalid_argument, GeometryError};
use crate::renderer::GeometryBuffer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    X,
    Y,
    #[default]
    Z,
}

impl UpAxis {
    pub const ALL: [UpAxis; 3] = [UpAxis::X, UpAxis::Y, UpAxis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            UpAxis::X => Vec3::X,
            UpAxis::Y => Vec3::Y,
            UpAxis::Z => Vec3::Z,
        }
    }
}

impl fmt::Display for UpAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpAxis::X => "x",
            UpAxis::Y => "y",
            UpAxis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for UpAxis {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(UpAxis::X),
            "y" => Ok(UpAxis::Y),
            "z" => Ok(UpAxis::Z),
            other => Err(invalid_argument(
                "up_axis",
                format!("unknown axis '{}', expected x, y or z", other),
            )),
        }
    }
}

impl TryFrom<u32> for UpAxis {
    type Error = GeometryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UpAxis::X),
            1 => Ok(UpAxis::Y),
            2 => Ok(UpAxis::Z),
            other => Err(invalid_argument(
                "up_axis",
                format!("axis index {} out of range 0..=2", other),
            )),
        }
    }
}

/// Row-major signed permutation taking `from`-up coordinates to `to`-up.
struct AxisRemap {
    from: UpAxis,
    to: UpAxis,
    rows: [[f32; 3]; 3],
}

// Each pair is a 90 degree rotation; (A, B) and (B, A) are transposes.
static AXIS_REMAP_TABLE: [AxisRemap; 6] = [
    // (x, y, z) -> (x, z, -y)
    AxisRemap {
        from: UpAxis::Z,
        to: UpAxis::Y,
        rows: [[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, -1.0, 0.0]],
    },
    // (x, y, z) -> (x, -z, y)
    AxisRemap {
        from: UpAxis::Y,
        to: UpAxis::Z,
        rows: [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]],
    },
    // (x, y, z) -> (z, y, -x)
    AxisRemap {
        from: UpAxis::Z,
        to: UpAxis::X,
        rows: [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]],
    },
    // (x, y, z) -> (-z, y, x)
    AxisRemap {
        from: UpAxis::X,
        to: UpAxis::Z,
        rows: [[0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    },
    // (x, y, z) -> (-y, x, z)
    AxisRemap {
        from: UpAxis::X,
        to: UpAxis::Y,
        rows: [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
    },
    // (x, y, z) -> (y, -x, z)
    AxisRemap {
        from: UpAxis::Y,
        to: UpAxis::X,
        rows: [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
    },
];

fn lookup(from: UpAxis, to: UpAxis) -> Option<&'static [[f32; 3]; 3]> {
    AXIS_REMAP_TABLE
        .iter()
        .find(|entry| entry.from == from && entry.to == to)
        .map(|entry| &entry.rows)
}

fn apply(rows: &[[f32; 3]; 3], p: Vec3) -> Vec3 {
    Vec3::new(
        rows[0][0] * p.x + rows[0][1] * p.y + rows[0][2] * p.z,
        rows[1][0] * p.x + rows[1][1] * p.y + rows[1][2] * p.z,
        rows[2][0] * p.x + rows[2][1] * p.y + rows[2][2] * p.z,
    )
}

/// The remap matrix for a directed axis pair, `None` when `from == to`.
pub fn axis_remap_matrix(from: UpAxis, to: UpAxis) -> Option<Mat3> {
    lookup(from, to).map(|rows| Mat3::from_cols_array_2d(rows).transpose())
}

/// Remap a single point or direction
pub fn remap_point(from: UpAxis, to: UpAxis, p: Vec3) -> Vec3 {
    match lookup(from, to) {
        Some(rows) => apply(rows, p),
        None => p,
    }
}

/// Remap every vertex position in `buffer`, whatever primitives it holds.
pub fn remap_buffer(buffer: &mut GeometryBuffer, from: UpAxis, to: UpAxis) {
    if let Some(rows) = lookup(from, to) {
        buffer.transform_positions(|p| apply(rows, p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn test_table_covers_every_directed_pair() {
        for from in UpAxis::ALL {
            for to in UpAxis::ALL {
                assert_eq!(lookup(from, to).is_some(), from != to, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_source_up_lands_on_target_up() {
        for from in UpAxis::ALL {
            for to in UpAxis::ALL {
                assert!(approx(remap_point(from, to, from.unit()), to.unit()), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_round_trip_restores_points() {
        let p = Vec3::new(0.3, -1.7, 2.9);
        for from in UpAxis::ALL {
            for to in UpAxis::ALL {
                let back = remap_point(to, from, remap_point(from, to, p));
                assert!(approx(back, p), "{} -> {} -> {}", from, to, from);
            }
        }
    }

    #[test]
    fn test_matrix_agrees_with_apply() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let m = axis_remap_matrix(UpAxis::Z, UpAxis::Y).unwrap();
        assert!(approx(m * p, remap_point(UpAxis::Z, UpAxis::Y, p)));
        assert!((m.determinant() - 1.0).abs() < 1e-6);
        assert!(axis_remap_matrix(UpAxis::X, UpAxis::X).is_none());
    }

    #[test]
    fn test_parse_axis() {
        assert_eq!("Y".parse::<UpAxis>().unwrap(), UpAxis::Y);
        assert_eq!(UpAxis::try_from(2).unwrap(), UpAxis::Z);
        assert!(matches!("w".parse::<UpAxis>(), Err(GeometryError::InvalidArgument { .. })));
        assert!(UpAxis::try_from(3).is_err());
    }
}
