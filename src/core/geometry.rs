//! Geometry and range value types
//!
//! Plain `Copy` values shared by the random engine and the request builder.
//! Coordinates are `f64` and the y axis grows downwards, so `min_y` is the
//! top edge of a rect.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serde::{Deserialize, Serialize};

use super::error::PlaceError;

/// Width/height pair describing an image or rect size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    pub fn new(width: f64, height: f64) -> Self {
        Dimension { width, height }
    }

    /// Reject sizes that cannot be requested or generated from
    pub fn validate(&self) -> Result<(), PlaceError> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(PlaceError::invalid(format!(
                "dimension must be finite, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(PlaceError::invalid(format!(
                "dimension must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Whole pixel width used in provider URLs (rounded, at least 1)
    pub fn pixel_width(&self) -> u32 {
        to_pixels(self.width)
    }

    /// Whole pixel height used in provider URLs (rounded, at least 1)
    pub fn pixel_height(&self) -> u32 {
        to_pixels(self.height)
    }
}

fn to_pixels(value: f64) -> u32 {
    // `as` saturates, so oversized values clamp to u32::MAX
    (value.round() as u32).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle described by its top-left origin and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Dimension,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            origin: Point::new(x, y),
            size: Dimension::new(width, height),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Edges are inclusive, so a point on the border is contained
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// A bounding rect must be finite with a non-negative size
    pub fn validate(&self) -> Result<(), PlaceError> {
        let values = [
            self.origin.x,
            self.origin.y,
            self.size.width,
            self.size.height,
            self.max_x(),
            self.max_y(),
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(PlaceError::invalid(format!("rect must be finite, got {self:?}")));
        }
        if self.size.width < 0.0 || self.size.height < 0.0 {
            return Err(PlaceError::invalid(format!(
                "rect size must not be negative, got {}x{}",
                self.size.width, self.size.height
            )));
        }
        Ok(())
    }
}

/// Closed `[low, high]` interval; construction enforces `low <= high`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct NumericRange {
    low: f64,
    high: f64,
}

#[derive(Deserialize)]
struct RawRange {
    low: f64,
    high: f64,
}

impl TryFrom<RawRange> for NumericRange {
    type Error = PlaceError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        NumericRange::new(raw.low, raw.high)
    }
}

impl NumericRange {
    /// Build a range; a reversed or non-finite pair is rejected, never swapped
    pub fn new(low: f64, high: f64) -> Result<Self, PlaceError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(PlaceError::invalid(format!(
                "range bounds must be finite, got [{low}, {high}]"
            )));
        }
        if low > high {
            return Err(PlaceError::invalid(format!(
                "range low bound {low} is greater than high bound {high}"
            )));
        }
        Ok(NumericRange { low, high })
    }

    /// Build `[location, location + length]` from a location/length pair
    pub fn from_location_length(location: f64, length: f64) -> Result<Self, PlaceError> {
        if length < 0.0 {
            return Err(PlaceError::invalid(format!(
                "range length must not be negative, got {length}"
            )));
        }
        NumericRange::new(location, location + length)
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}
