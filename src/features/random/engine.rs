//! # Feature: Random Data
//!
//! Numbers, geometry, names and phone numbers drawn from an injectable
//! [`RandomSource`]. Nothing here touches the network or blocks.
//!
//! Bounds are half-open `[0, n)` for the "less than" operations and closed
//! `[low, high]` for range and geometry operations, so a generated point can
//! land exactly on the edge of its bounding rect.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use rand::{Rng, RngCore};
use std::fmt;
use std::sync::Arc;

use super::pools::WordPools;
use super::source::{RandomSource, SourceRng, ThreadRandom};
use crate::core::{Dimension, NumericRange, PlaceError, Point, Rect};

/// Largest 53-bit value, the number of distinct steps in a closed unit draw
const UNIT_STEPS: f64 = ((1u64 << 53) - 1) as f64;

#[derive(Clone)]
pub struct RandomEngine {
    source: Arc<dyn RandomSource>,
    pools: Arc<WordPools>,
}

impl fmt::Debug for RandomEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomEngine")
            .field("first_names", &self.pools.first_names.len())
            .field("last_names", &self.pools.last_names.len())
            .field("business_words", &self.pools.business_words.len())
            .finish_non_exhaustive()
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        RandomEngine::new(Arc::new(ThreadRandom))
    }
}

impl RandomEngine {
    /// Engine over the built-in word pools
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        RandomEngine {
            source,
            pools: Arc::new(WordPools::default()),
        }
    }

    /// Engine over caller-supplied word pools
    pub fn with_pools(source: Arc<dyn RandomSource>, pools: WordPools) -> Result<Self, PlaceError> {
        pools
            .validate()
            .map_err(|e| PlaceError::invalid(e.to_string()))?;
        Ok(RandomEngine {
            source,
            pools: Arc::new(pools),
        })
    }

    pub fn pools(&self) -> &WordPools {
        &self.pools
    }

    fn rng(&self) -> SourceRng<'_> {
        SourceRng(self.source.as_ref())
    }

    /// Uniform value in the closed interval `[0, 1]`; both ends are reachable
    fn unit_closed(&self) -> f64 {
        (self.rng().next_u64() >> 11) as f64 / UNIT_STEPS
    }

    /// Uniform value in `[low, high]`, callers guarantee `low <= high`
    fn float_between(&self, low: f64, high: f64) -> f64 {
        if low == high {
            return low;
        }
        let t = self.unit_closed();
        // Weighted form hits `low` and `high` exactly at t = 0 and t = 1
        (low * (1.0 - t) + high * t).clamp(low, high)
    }

    // ------------------------------------------------------------------
    // Numbers
    // ------------------------------------------------------------------

    /// Integer in `[0, exclusive_upper_bound)`
    pub fn random_integer(&self, exclusive_upper_bound: i64) -> Result<i64, PlaceError> {
        if exclusive_upper_bound <= 0 {
            return Err(PlaceError::invalid(format!(
                "upper bound must be positive, got {exclusive_upper_bound}"
            )));
        }
        Ok(self.rng().random_range(0..exclusive_upper_bound))
    }

    /// Float in `[0, exclusive_upper_bound)`
    pub fn random_float(&self, exclusive_upper_bound: f64) -> Result<f64, PlaceError> {
        if !exclusive_upper_bound.is_finite() || exclusive_upper_bound <= 0.0 {
            return Err(PlaceError::invalid(format!(
                "upper bound must be a positive finite number, got {exclusive_upper_bound}"
            )));
        }
        let value = self.rng().random_range(0.0..exclusive_upper_bound);
        // Float rounding can land on the bound itself; keep the range half-open
        if value < exclusive_upper_bound {
            Ok(value)
        } else {
            Ok(f64::from_bits(exclusive_upper_bound.to_bits() - 1))
        }
    }

    /// Float in `[range.low, range.high]`
    pub fn random_float_in(&self, range: NumericRange) -> f64 {
        self.float_between(range.low(), range.high())
    }

    /// Float in `[0.0, 1.0]`
    pub fn random_percentage(&self) -> f64 {
        self.unit_closed()
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Width and height drawn independently from the same range
    pub fn random_dimension(
        &self,
        dimension_range: NumericRange,
    ) -> Result<Dimension, PlaceError> {
        self.random_dimension_xy(dimension_range, dimension_range)
    }

    /// Both ranges must lie strictly above zero so every draw is a valid size
    pub fn random_dimension_xy(
        &self,
        x_range: NumericRange,
        y_range: NumericRange,
    ) -> Result<Dimension, PlaceError> {
        for (axis, range) in [("width", x_range), ("height", y_range)] {
            if range.low() <= 0.0 {
                return Err(PlaceError::invalid(format!(
                    "{axis} range must be positive, got [{}, {}]",
                    range.low(),
                    range.high()
                )));
            }
        }
        let size = Dimension::new(self.random_float_in(x_range), self.random_float_in(y_range));
        size.validate()?;
        Ok(size)
    }

    /// Rect fully contained in `bounds`, edges included
    pub fn random_rect(&self, bounds: &Rect) -> Result<Rect, PlaceError> {
        bounds.validate()?;

        let (x, width) = self.random_span(bounds.min_x(), bounds.size.width, bounds.max_x());
        let (y, height) = self.random_span(bounds.min_y(), bounds.size.height, bounds.max_y());
        Ok(Rect::new(x, y, width, height))
    }

    /// Place a random length somewhere along `[start, end]` without overhanging `end`
    fn random_span(&self, start: f64, extent: f64, end: f64) -> (f64, f64) {
        let len = self.float_between(0.0, extent);
        let offset = self.float_between(0.0, extent - len);
        let origin = start + offset;
        (origin, fit_span(origin, len, end))
    }

    /// Point inside `bounds`; points exactly on an edge are possible
    pub fn random_point(&self, bounds: &Rect) -> Result<Point, PlaceError> {
        bounds.validate()?;
        Ok(Point::new(
            self.float_between(bounds.min_x(), bounds.max_x()),
            self.float_between(bounds.min_y(), bounds.max_y()),
        ))
    }

    // ------------------------------------------------------------------
    // Names and phone numbers
    // ------------------------------------------------------------------

    fn pick<'a>(&self, pool: &'a [String]) -> &'a str {
        // Pools are validated non-empty on construction
        &pool[self.rng().random_range(0..pool.len())]
    }

    pub fn random_first_name(&self) -> String {
        self.pick(&self.pools.first_names).to_string()
    }

    pub fn random_last_name(&self) -> String {
        self.pick(&self.pools.last_names).to_string()
    }

    pub fn random_full_name(&self) -> String {
        format!("{} {}", self.random_first_name(), self.random_last_name())
    }

    /// `word_count` independent draws from the business-word pool
    pub fn random_business_name(&self, word_count: usize) -> Result<String, PlaceError> {
        if word_count == 0 {
            return Err(PlaceError::invalid("business name needs at least one word"));
        }
        let words: Vec<&str> = (0..word_count)
            .map(|_| self.pick(&self.pools.business_words))
            .collect();
        Ok(words.join(" "))
    }

    /// US-style number, `(XXX) XXX-XXXX`, every digit drawn independently
    pub fn random_phone_number(&self) -> String {
        let mut rng = self.rng();
        let mut digits = [0u8; 10];
        for digit in digits.iter_mut() {
            *digit = rng.random_range(0..10u8);
        }
        let group = |range: std::ops::Range<usize>| -> String {
            digits[range].iter().map(|d| char::from(b'0' + d)).collect()
        };
        format!("({}) {}-{}", group(0..3), group(3..6), group(6..10))
    }
}

/// Shrink `len` until `start + len` does not pass `end` under float rounding
fn fit_span(start: f64, len: f64, end: f64) -> f64 {
    let mut len = len.min(end - start).max(0.0);
    while len > 0.0 && start + len > end {
        // Next representable value below `len`
        len = f64::from_bits(len.to_bits() - 1);
    }
    len
}
