use super::{AssignOptions, Violation, ViolationKind};
use crate::model::{Roster, Shift, DAYS_PER_WEEK};

/// Vérifie les invariants du planning. `UnderCoverage` n'est qu'un objectif :
/// il est signalé mais n'indique pas un planning corrompu.
pub(super) fn validate(roster: &Roster, opts: AssignOptions) -> Vec<Violation> {
    let mut out = Vec::new();
    let schedule = roster.schedule();

    for id in roster.ids() {
        let Some(emp) = roster.employee(id) else {
            continue;
        };

        for day in 0..DAYS_PER_WEEK {
            let shifts = Shift::ALL
                .into_iter()
                .filter(|&s| schedule.is_assigned_to(id, day, s))
                .count();
            let repeats = Shift::ALL
                .into_iter()
                .any(|s| schedule.cell(day, s).iter().filter(|&&x| x == id).count() > 1);
            if shifts > 1 || repeats {
                out.push(Violation {
                    kind: ViolationKind::DoubleBooking,
                    employee: Some(id),
                    day: Some(day),
                    shift: None,
                });
            }
        }

        if emp.assigned_days() > opts.max_days_per_week {
            out.push(Violation {
                kind: ViolationKind::OverCap,
                employee: Some(id),
                day: None,
                shift: None,
            });
        }

        if schedule.count_for(id) != usize::from(emp.assigned_days()) {
            out.push(Violation {
                kind: ViolationKind::CountMismatch,
                employee: Some(id),
                day: None,
                shift: None,
            });
        }
    }

    for (day, shift, ids) in schedule.cells() {
        if ids.len() < opts.min_coverage {
            out.push(Violation {
                kind: ViolationKind::UnderCoverage,
                employee: None,
                day: Some(day),
                shift: Some(shift),
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Employee, EmployeeId};

    #[test]
    fn empty_schedule_is_only_under_covered() {
        let r = Roster::new(vec![Employee::new("a")]);
        let v = validate(&r, AssignOptions::default());
        assert_eq!(v.len(), 21);
        assert!(v.iter().all(|x| x.kind == ViolationKind::UnderCoverage));
    }

    #[test]
    fn primitive_keeps_hard_invariants() {
        let mut r = Roster::new(vec![Employee::new("a"), Employee::new("b")]);
        for day in 0..7 {
            for shift in Shift::ALL {
                r.assign(EmployeeId::new(0), day, shift, 5);
                r.assign(EmployeeId::new(1), day, shift, 5);
            }
        }
        let opts = AssignOptions {
            min_coverage: 0,
            ..AssignOptions::default()
        };
        assert!(validate(&r, opts).is_empty());
    }
}
