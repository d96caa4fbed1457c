//! Arithmetic problem generation
//!
//! Operands are drawn from a range that widens with the level. Questions are
//! rendered in the configured numeral system; answers stay plain integers.

use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::numerals::{NumeralSystem, format};
use crate::settings::ProblemSettings;

/// Identifier shared by a problem and the UFO carrying its answer.
/// Allocated from a per-session counter, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(pub u64);

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arithmetic operations, serialized by symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*", alias = "×")]
    Multiply,
    #[serde(rename = "/", alias = "÷")]
    Divide,
}

impl Operation {
    /// Glyph shown in questions
    pub fn glyph(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '×',
            Operation::Divide => '÷',
        }
    }
}

/// Inclusive operand bounds for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandRange {
    pub min: i64,
    pub max: i64,
}

impl OperandRange {
    /// Bounds saturate at the `i64` limits; `Settings::validate` rejects
    /// settings whose reachable levels come anywhere near them.
    pub fn for_level(settings: &ProblemSettings, level: u32) -> Self {
        let steps = level.max(1) as i64 - 1;
        Self {
            min: settings
                .base_min
                .saturating_add(steps.saturating_mul(settings.min_step)),
            max: settings
                .base_max
                .saturating_add(steps.saturating_mul(settings.max_step)),
        }
    }

    pub fn contains(&self, n: i64) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

/// A question/answer pair. Immutable: consumed problems are replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    /// Rendered question, e.g. `٣ × ٤`
    pub question: String,
    pub answer: i64,
    pub operation: Operation,
    /// Operands as drawn, before any reordering for display
    pub operands: (i64, i64),
}

impl Problem {
    /// Build a problem from fixed operands
    pub fn from_operands(
        id: ProblemId,
        operation: Operation,
        n1: i64,
        n2: i64,
        allow_negative: bool,
        numerals: NumeralSystem,
    ) -> Self {
        let (left, right, answer) = match operation {
            Operation::Add => (n1, n2, n1.saturating_add(n2)),
            Operation::Multiply => (n1, n2, n1.saturating_mul(n2)),
            Operation::Subtract if allow_negative => (n1, n2, n1.saturating_sub(n2)),
            Operation::Subtract => {
                let (hi, lo) = if n1 < n2 { (n2, n1) } else { (n1, n2) };
                (hi, lo, hi.saturating_sub(lo))
            }
            // Show the product so the quotient is always whole
            Operation::Divide => (n1.saturating_mul(n2), n1, n2),
        };

        let question = format!(
            "{} {} {}",
            format(left, numerals),
            operation.glyph(),
            format(right, numerals)
        );

        Self {
            id,
            question,
            answer,
            operation,
            operands: (n1, n2),
        }
    }

    /// Draw a random problem for `level`
    pub fn generate<R: Rng + ?Sized>(
        id: ProblemId,
        level: u32,
        settings: &ProblemSettings,
        rng: &mut R,
    ) -> Self {
        let range = OperandRange::for_level(settings, level);
        let operation = settings
            .operations
            .choose(rng)
            .copied()
            .unwrap_or(Operation::Multiply);

        let n1 = rng.random_range(range.min..=range.max);
        let n2 = rng.random_range(range.min..=range.max);

        Self::from_operands(
            id,
            operation,
            n1,
            n2,
            settings.allow_negative,
            settings.numerals,
        )
    }
}
