//! Scale divisions: bounds plus minor, medium and major tick lists.

use crate::interval::Interval;

/// Tick category, ordered from the finest to the coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickType {
    /// Minor ticks
    Minor = 0,
    /// Medium ticks
    Medium = 1,
    /// Major ticks
    Major = 2,
}

impl TickType {
    /// All tick types, finest first.
    pub const ALL: [Self; 3] = [Self::Minor, Self::Medium, Self::Major];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Result of a scale engine: two bounds and three tick lists.
///
/// `lower_bound` may exceed `upper_bound`, which describes an inverted scale.
/// Tick lists keep the order they were built in; inverting the division only
/// swaps the bounds.
#[derive(Debug, Clone, Default)]
pub struct ScaleDiv {
    lower_bound: f64,
    upper_bound: f64,
    ticks: [Vec<f64>; 3],
    epsilon: f64,
}

impl PartialEq for ScaleDiv {
    fn eq(&self, other: &Self) -> bool {
        self.lower_bound == other.lower_bound
            && self.upper_bound == other.upper_bound
            && self.ticks == other.ticks
    }
}

impl ScaleDiv {
    /// Division without ticks.
    #[must_use]
    pub fn new(lower_bound: f64, upper_bound: f64) -> Self {
        Self::with_ticks(lower_bound, upper_bound, [Vec::new(), Vec::new(), Vec::new()])
    }

    /// Division with ticks indexed by [`TickType`].
    #[must_use]
    pub fn with_ticks(lower_bound: f64, upper_bound: f64, ticks: [Vec<f64>; 3]) -> Self {
        let mut div = Self {
            lower_bound,
            upper_bound,
            ticks,
            epsilon: 0.0,
        };
        div.compute_epsilon();
        div
    }

    /// Division spanning a normalized interval.
    #[must_use]
    pub fn from_interval(interval: &Interval, ticks: [Vec<f64>; 3]) -> Self {
        Self::with_ticks(interval.min_value(), interval.max_value(), ticks)
    }

    fn compute_epsilon(&mut self) {
        self.epsilon = self.range().abs() / 1000.0;
    }

    /// First bound.
    #[must_use]
    pub const fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Second bound.
    #[must_use]
    pub const fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Replace both bounds.
    pub fn set_interval(&mut self, lower_bound: f64, upper_bound: f64) {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self.compute_epsilon();
    }

    /// Signed range `upper - lower`.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Containment tolerance, a thousandth of the range.
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Bounds as a normalized interval.
    #[must_use]
    pub fn bounds(&self) -> Interval {
        Interval::new(self.lower_bound, self.upper_bound).normalized()
    }

    /// Both bounds equal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    /// `lower_bound <= upper_bound`
    #[must_use]
    pub fn is_increasing(&self) -> bool {
        self.lower_bound <= self.upper_bound
    }

    /// Tolerant containment test, independent of the bound order.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let min = self.lower_bound.min(self.upper_bound);
        let max = self.lower_bound.max(self.upper_bound);
        value + self.epsilon >= min && value <= max + self.epsilon
    }

    /// Ticks of one type.
    #[must_use]
    pub fn ticks(&self, tick_type: TickType) -> &[f64] {
        &self.ticks[tick_type.index()]
    }

    /// Replace the ticks of one type.
    pub fn set_ticks(&mut self, tick_type: TickType, ticks: Vec<f64>) {
        self.ticks[tick_type.index()] = ticks;
    }

    /// Swap the bounds in place.
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.lower_bound, &mut self.upper_bound);
    }

    /// Copy with swapped bounds.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut div = self.clone();
        div.invert();
        div
    }

    /// Division over `[lower_bound, upper_bound]` keeping only the ticks
    /// inside it.
    #[must_use]
    pub fn bounded(&self, lower_bound: f64, upper_bound: f64) -> Self {
        let min = lower_bound.min(upper_bound);
        let max = lower_bound.max(upper_bound);
        let ticks = TickType::ALL.map(|t| {
            self.ticks(t)
                .iter()
                .copied()
                .filter(|&v| v >= min && v <= max)
                .collect()
        });
        Self::with_ticks(lower_bound, upper_bound, ticks)
    }
}
