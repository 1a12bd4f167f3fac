use crate::types::analysis::Score;

/// Analyzer weights in fixed order: message, diff, risk, test.
pub const WEIGHTS: [f64; 4] = [0.25, 0.25, 0.30, 0.20];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCard {
    pub message: Score,
    pub diff: Score,
    pub risk: Score,
    pub test: Score,
}

impl ScoreCard {
    pub fn new(message: Score, diff: Score, risk: Score, test: Score) -> Self {
        Self {
            message,
            diff,
            risk,
            test,
        }
    }

    /// Weighted sum of the four analyzer scores, rounded to two decimals.
    pub fn overall(&self) -> f64 {
        let scores = [self.message, self.diff, self.risk, self.test];
        let sum: f64 = scores
            .iter()
            .zip(WEIGHTS.iter())
            .map(|(score, weight)| f64::from(*score) * weight)
            .sum();
        round2(sum)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
