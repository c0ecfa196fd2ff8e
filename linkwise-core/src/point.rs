//! Integer 3-D points and their distance metric.

use std::{fmt, num::ParseIntError, str::FromStr};

use thiserror::Error;

/// A point with integer coordinates.
///
/// # Examples
/// ```
/// use linkwise_core::Point3;
///
/// let point: Point3 = " 162,817,812 ".parse()?;
/// assert_eq!(point, Point3::new(162, 817, 812));
/// assert_eq!(point.to_string(), "162,817,812");
/// # Ok::<(), linkwise_core::ParsePointError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point3 {
    x: i64,
    y: i64,
    z: i64,
}

impl Point3 {
    /// Largest coordinate magnitude accepted when parsing. Three squared
    /// differences between such coordinates still fit in an `i128`.
    pub const COORDINATE_LIMIT: i64 = 1 << 61;

    /// Creates a point.
    #[must_use]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The x coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x(&self) -> i64 { self.x }

    /// The y coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y(&self) -> i64 { self.y }

    /// The z coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn z(&self) -> i64 { self.z }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Squared Euclidean distance.
///
/// Orders pairs exactly like the Euclidean distance while staying in integer
/// arithmetic. Computed in `i128`; exact for coordinates within
/// [`Point3::COORDINATE_LIMIT`] and saturating at `i128::MAX` beyond it.
/// Usable directly as a [`crate::WeightFn`].
///
/// # Examples
/// ```
/// use linkwise_core::{Point3, squared_distance};
///
/// let origin = Point3::new(0, 0, 0);
/// assert_eq!(squared_distance(&origin, &Point3::new(1, 2, 2)), 9);
/// ```
#[must_use]
pub fn squared_distance(left: &Point3, right: &Point3) -> i128 {
    let axis = |a: i64, b: i64| {
        let delta = i128::from(a) - i128::from(b);
        delta.saturating_mul(delta)
    };
    axis(left.x, right.x)
        .saturating_add(axis(left.y, right.y))
        .saturating_add(axis(left.z, right.z))
}

/// Error returned when a point fails to parse.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParsePointError {
    /// The text did not hold exactly three comma-separated fields.
    #[error("expected 3 comma-separated coordinates, found {found}")]
    FieldCount {
        /// Number of fields present.
        found: usize,
    },
    /// A coordinate was not an integer.
    #[error("coordinate `{raw}` is not an integer: {error}")]
    Coordinate {
        /// The offending field.
        raw: String,
        /// Underlying parse failure.
        #[source]
        error: ParseIntError,
    },
    /// A coordinate exceeded [`Point3::COORDINATE_LIMIT`] in magnitude.
    #[error("coordinate {value} is outside ±{limit}", limit = Point3::COORDINATE_LIMIT)]
    OutOfRange {
        /// The offending value.
        value: i64,
    },
}

impl FromStr for Point3 {
    type Err = ParsePointError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = raw.trim().split(',').map(str::trim).collect();
        let [x, y, z] = fields.as_slice() else {
            return Err(ParsePointError::FieldCount {
                found: fields.len(),
            });
        };
        Ok(Self::new(coordinate(x)?, coordinate(y)?, coordinate(z)?))
    }
}

fn coordinate(raw: &str) -> Result<i64, ParsePointError> {
    let value: i64 = raw.parse().map_err(|error| ParsePointError::Coordinate {
        raw: raw.to_owned(),
        error,
    })?;
    if value.unsigned_abs() > Point3::COORDINATE_LIMIT.unsigned_abs() {
        return Err(ParsePointError::OutOfRange { value });
    }
    Ok(value)
}
