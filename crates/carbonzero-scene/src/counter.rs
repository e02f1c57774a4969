//! Simulated live CO₂ counter.

use rand::Rng;

/// A running total that grows by a random amount on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Co2Counter {
    total: f64,
    max_step: f64,
}

impl Co2Counter {
    pub fn new(start: f64, max_step: f64) -> Self {
        Self {
            total: start,
            max_step: max_step.max(0.0),
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Add a uniform random amount in `0..max_step` and return it.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> f64 {
        let delta = rng.r#gen::<f64>() * self.max_step;
        self.total += delta;
        delta
    }

    /// Total formatted with thousands separators, e.g. `37,000,000,074`.
    pub fn display(&self) -> String {
        format_grouped(self.total)
    }
}

/// Round to a whole number and group digits in threes with commas.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
