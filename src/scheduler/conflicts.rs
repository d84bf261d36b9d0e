use super::AssignOptions;
use crate::model::{EmployeeId, Roster, DAYS_PER_WEEK};

/// Second passage : pour chaque jour avec préférence où l'employé n'a rien
/// obtenu, on suit son classement global le même jour, puis le lendemain.
pub(super) fn resolve_conflicts(roster: &mut Roster, opts: AssignOptions) -> usize {
    let mut placed = 0usize;
    let ids: Vec<_> = roster.ids().collect();

    for id in ids {
        for day in 0..DAYS_PER_WEEK {
            let Some(emp) = roster.employee(id) else {
                break;
            };
            if emp.assigned_days() >= opts.max_days_per_week {
                break;
            }
            if emp.preference(day).is_none() || roster.is_assigned_on(id, day) {
                continue;
            }

            if try_ranking(roster, id, day, opts) {
                placed += 1;
            } else if day + 1 < DAYS_PER_WEEK && try_ranking(roster, id, day + 1, opts) {
                tracing::debug!(employee = id.index(), day, "moved to next day");
                placed += 1;
            }
        }
    }

    tracing::debug!(placed, "conflict resolution done");
    placed
}

/// Parcourt le classement : premier shift accepté tant que l'employé est libre ce jour-là.
fn try_ranking(roster: &mut Roster, id: EmployeeId, day: usize, opts: AssignOptions) -> bool {
    let Some(ranking) = roster.employee(id).map(|e| *e.global_ranking()) else {
        return false;
    };
    for shift in ranking {
        let Some(emp) = roster.employee(id) else {
            return false;
        };
        if emp.assigned_days() >= opts.max_days_per_week {
            break;
        }
        if roster.is_assigned_on(id, day) {
            continue;
        }
        if roster.assign(id, day, shift, opts.max_days_per_week) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::super::preference::preference_pass;
    use super::*;
    use crate::model::{Employee, Shift};

    fn capped(cap: usize) -> AssignOptions {
        AssignOptions {
            shift_capacity: Some(cap),
            ..AssignOptions::default()
        }
    }

    #[test]
    fn inert_after_unbounded_preference_pass() {
        let mut r = Roster::new(vec![
            Employee::new("a").prefer_every_day(Shift::Morning),
            Employee::new("b").prefer_every_day(Shift::Evening),
        ]);
        preference_pass(&mut r, AssignOptions::default());
        let before = r.schedule().clone();
        assert_eq!(resolve_conflicts(&mut r, AssignOptions::default()), 0);
        assert_eq!(r.schedule(), &before);
    }

    #[test]
    fn falls_back_on_ranking_same_day() {
        let a = Employee::new("a").prefer(0, Some(Shift::Morning)).unwrap();
        let b = Employee::new("b")
            .prefer(0, Some(Shift::Morning))
            .unwrap()
            .with_ranking([Shift::Evening, Shift::Afternoon, Shift::Morning])
            .unwrap();
        let mut r = Roster::new(vec![a, b]);
        let opts = capped(1);
        preference_pass(&mut r, opts);
        assert_eq!(resolve_conflicts(&mut r, opts), 1);
        assert!(r.is_assigned_to(EmployeeId::new(1), 0, Shift::Evening));
    }

    #[test]
    fn ranking_ignores_capacity() {
        // le classement n'est pas soumis au plafond souple
        let a = Employee::new("a").prefer(2, Some(Shift::Afternoon)).unwrap();
        let b = Employee::new("b").prefer(2, Some(Shift::Afternoon)).unwrap();
        let mut r = Roster::new(vec![a, b]);
        let opts = capped(1);
        preference_pass(&mut r, opts);
        resolve_conflicts(&mut r, opts);
        assert!(r.is_assigned_to(EmployeeId::new(1), 2, Shift::Morning));
        assert_eq!(r.employee(EmployeeId::new(1)).unwrap().assigned_days(), 1);
    }

    #[test]
    fn try_ranking_respects_cap() {
        let mut r = Roster::new(vec![Employee::new("a")]);
        let id = EmployeeId::new(0);
        let opts = AssignOptions {
            max_days_per_week: 1,
            ..AssignOptions::default()
        };
        assert!(try_ranking(&mut r, id, 3, opts));
        assert!(r.is_assigned_to(id, 3, Shift::Morning));
        assert!(!try_ranking(&mut r, id, 4, opts));
        assert!(!try_ranking(&mut r, id, 3, AssignOptions::default()));
    }
}
