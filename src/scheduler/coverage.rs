use super::{AssignOptions, CoverageGap};
use crate::model::{EmployeeId, Roster, Shift, DAYS_PER_WEEK};
use rand::seq::SliceRandom;
use rand::Rng;

/// Dernier passage : complète chaque cellule jusqu'à `min_coverage` en tirant
/// au hasard parmi les employés encore disponibles. Les cellules qui restent
/// courtes sont retournées, sans erreur.
pub(super) fn backfill_coverage<R: Rng + ?Sized>(
    roster: &mut Roster,
    opts: AssignOptions,
    rng: &mut R,
) -> (usize, Vec<CoverageGap>) {
    let mut placed = 0usize;
    let mut gaps = Vec::new();

    for day in 0..DAYS_PER_WEEK {
        for shift in Shift::ALL {
            placed += fill_cell(roster, day, shift, opts, rng);

            let staffed = roster.schedule().cell(day, shift).len();
            if staffed < opts.min_coverage {
                tracing::warn!(day, shift = %shift, staffed, required = opts.min_coverage, "shift under-covered");
                gaps.push(CoverageGap {
                    day,
                    shift,
                    staffed,
                    required: opts.min_coverage,
                });
            }
        }
    }

    tracing::debug!(placed, gaps = gaps.len(), "coverage backfill done");
    (placed, gaps)
}

/// Tire des candidats pour une cellule jusqu'à `min_coverage` ou épuisement du pool.
pub(super) fn fill_cell<R: Rng + ?Sized>(
    roster: &mut Roster,
    day: usize,
    shift: Shift,
    opts: AssignOptions,
    rng: &mut R,
) -> usize {
    let mut placed = 0usize;
    while roster.schedule().cell(day, shift).len() < opts.min_coverage {
        let pool = eligible_pool(roster, day, opts);
        let Some(&pick) = pool.choose(rng) else {
            break;
        };
        if !roster.assign(pick, day, shift, opts.max_days_per_week) {
            break;
        }
        placed += 1;
    }
    placed
}

/// Employés sous le plafond et libres ce jour-là, dans l'ordre du roster.
pub(super) fn eligible_pool(roster: &Roster, day: usize, opts: AssignOptions) -> Vec<EmployeeId> {
    roster
        .ids()
        .filter(|&id| {
            roster
                .employee(id)
                .is_some_and(|e| e.assigned_days() < opts.max_days_per_week)
                && !roster.is_assigned_on(id, day)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Employee;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn crew(n: usize) -> Vec<Employee> {
        (0..n).map(|i| Employee::new(format!("e{i}"))).collect()
    }

    #[test]
    fn fills_every_cell_when_pool_is_large_enough() {
        // 42 places ; avec 13 employés il en reste toujours 6 libres le dernier jour
        let mut r = Roster::new(crew(13));
        let mut rng = StdRng::seed_from_u64(7);
        let (placed, gaps) = backfill_coverage(&mut r, AssignOptions::default(), &mut rng);
        assert!(gaps.is_empty(), "{gaps:?}");
        assert_eq!(placed, 42);
        for (_, _, ids) in r.schedule().cells() {
            assert_eq!(ids.len(), 2);
        }
    }

    #[test]
    fn single_employee_leaves_other_shifts_short() {
        let mut r = Roster::new(crew(1));
        let mut rng = StdRng::seed_from_u64(1);
        let (placed, gaps) = backfill_coverage(&mut r, AssignOptions::default(), &mut rng);
        assert_eq!(placed, 5);
        // chaque cellule est courte
        assert_eq!(gaps.len(), 21);
        let id = EmployeeId::new(0);
        for day in 0..5 {
            assert!(r.is_assigned_to(id, day, Shift::Morning));
        }
        assert!(!r.is_assigned_on(id, 5));
    }

    #[test]
    fn pool_excludes_busy_and_capped() {
        let mut r = Roster::new(crew(3));
        let opts = AssignOptions {
            max_days_per_week: 1,
            ..AssignOptions::default()
        };
        r.assign(EmployeeId::new(0), 0, Shift::Morning, 1);
        r.assign(EmployeeId::new(1), 1, Shift::Morning, 1);
        assert_eq!(eligible_pool(&r, 0, opts), vec![EmployeeId::new(2)]);
        assert_eq!(eligible_pool(&r, 2, opts), vec![EmployeeId::new(2)]);
    }

    #[test]
    fn short_cell_means_pool_was_empty_when_it_stalled() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 1..8 {
            let mut r = Roster::new(crew(n));
            let opts = AssignOptions::default();
            for day in 0..DAYS_PER_WEEK {
                for shift in Shift::ALL {
                    fill_cell(&mut r, day, shift, opts, &mut rng);
                    if r.schedule().cell(day, shift).len() < opts.min_coverage {
                        assert!(
                            eligible_pool(&r, day, opts).is_empty(),
                            "n={n} day={day} shift={shift}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn fill_cell_stops_at_min_coverage() {
        let mut r = Roster::new(crew(5));
        let mut rng = StdRng::seed_from_u64(4);
        let placed = fill_cell(&mut r, 2, Shift::Evening, AssignOptions::default(), &mut rng);
        assert_eq!(placed, 2);
        assert_eq!(r.schedule().cell(2, Shift::Evening).len(), 2);
        assert_eq!(eligible_pool(&r, 2, AssignOptions::default()).len(), 3);
    }

    #[test]
    fn same_seed_same_schedule() {
        let run = |seed| {
            let mut r = Roster::new(crew(6));
            let mut rng = StdRng::seed_from_u64(seed);
            backfill_coverage(&mut r, AssignOptions::default(), &mut rng);
            r.schedule().clone()
        };
        assert_eq!(run(42), run(42));
    }
}
