mod conflicts;
mod coverage;
mod preference;
mod types;
mod validate;

pub use types::{AssignOptions, CoverageGap, Outcome, SchedError, Violation, ViolationKind};

use crate::model::{Employee, Roster};
use rand::Rng;

/// Scheduler : encapsule un Roster et enchaîne les trois passages
/// (préférences, résolution, couverture minimale).
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
    opts: AssignOptions,
}

impl Scheduler {
    pub fn new(employees: Vec<Employee>, opts: AssignOptions) -> Self {
        Self {
            roster: Roster::new(employees),
            opts,
        }
    }

    /// Comme `new`, mais refuse un roster vide.
    pub fn try_new(employees: Vec<Employee>, opts: AssignOptions) -> Result<Self, SchedError> {
        if employees.is_empty() {
            return Err(SchedError::EmptyRoster);
        }
        Ok(Self::new(employees, opts))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn into_roster(self) -> Roster {
        self.roster
    }

    pub fn options(&self) -> AssignOptions {
        self.opts
    }

    pub fn preference_pass(&mut self) -> usize {
        preference::preference_pass(&mut self.roster, self.opts)
    }

    pub fn resolve_conflicts(&mut self) -> usize {
        conflicts::resolve_conflicts(&mut self.roster, self.opts)
    }

    pub fn backfill_coverage<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (usize, Vec<CoverageGap>) {
        coverage::backfill_coverage(&mut self.roster, self.opts, rng)
    }

    /// Exécute les trois passages dans l'ordre, une seule fois chacun.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Outcome {
        let preferred = self.preference_pass();
        let resolved = self.resolve_conflicts();
        let (backfilled, gaps) = self.backfill_coverage(rng);
        tracing::info!(
            employees = self.roster.employees().len(),
            preferred,
            resolved,
            backfilled,
            gaps = gaps.len(),
            "schedule built"
        );
        Outcome {
            preferred,
            resolved,
            backfilled,
            gaps,
        }
    }

    pub fn validate(&self) -> Vec<Violation> {
        validate::validate(&self.roster, self.opts)
    }
}
