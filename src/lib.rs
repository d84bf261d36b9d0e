#![forbid(unsafe_code)]
//! Shift roster — planification hebdomadaire d'employés sur trois shifts par jour.
//!
//! - Trois passages : préférences, résolution via classement personnel, couverture minimale.
//! - Plafond de jours par semaine, un seul shift par jour et par employé.
//! - Tirage aléatoire injectable (graine fixe => planning reproductible).
//! - Import CSV/JSON et rendu texte en dehors du cœur d'allocation.

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod report;
pub mod sample;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{Employee, EmployeeId, Roster, Schedule, Shift, DAYS_PER_WEEK, DAY_NAMES};
pub use report::{ScheduleRenderer, ScheduleReport, TextTable};
pub use sample::sample_employees;
pub use scheduler::{AssignOptions, CoverageGap, Outcome, SchedError, Scheduler, Violation, ViolationKind};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, RosterFile, Storage};
