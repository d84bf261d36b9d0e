use crate::model::{EmployeeId, Shift};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options d'assignation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignOptions {
    /// Plafond de jours travaillés par semaine.
    pub max_days_per_week: u8,
    /// Effectif minimal visé pour chaque shift de chaque jour.
    pub min_coverage: usize,
    /// Plafond souple par cellule, appliqué uniquement au premier passage.
    pub shift_capacity: Option<usize>,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            max_days_per_week: 5,
            min_coverage: 2,
            shift_capacity: None,
        }
    }
}

/// Cellule restée sous l'effectif minimal faute de candidats.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoverageGap {
    pub day: usize,
    pub shift: Shift,
    pub staffed: usize,
    pub required: usize,
}

/// Bilan d'une exécution complète des trois passages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub preferred: usize,
    pub resolved: usize,
    pub backfilled: usize,
    pub gaps: Vec<CoverageGap>,
}

impl Outcome {
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    DoubleBooking,   // plusieurs shifts le même jour
    OverCap,         // plus de jours que le plafond
    CountMismatch,   // compteur != apparitions dans la grille
    UnderCoverage,   // cellule sous l'effectif minimal
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub employee: Option<EmployeeId>,
    pub day: Option<usize>,
    pub shift: Option<Shift>,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid ranking: {0} (expected a permutation of M, A, E)")]
    InvalidRanking(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("invalid day index: {0}")]
    InvalidDay(usize),
    #[error("roster is empty")]
    EmptyRoster,
}
