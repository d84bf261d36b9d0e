use super::AssignOptions;
use crate::model::{Roster, DAYS_PER_WEEK};

/// Premier passage : chaque employé, dans l'ordre du roster, reçoit son shift
/// préféré jour après jour jusqu'à atteindre le plafond hebdomadaire.
pub(super) fn preference_pass(roster: &mut Roster, opts: AssignOptions) -> usize {
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
            let Some(pref) = emp.preference(day) else {
                continue;
            };
            if let Some(cap) = opts.shift_capacity {
                if roster.schedule().cell(day, pref).len() >= cap {
                    continue;
                }
            }
            if roster.assign(id, day, pref, opts.max_days_per_week) {
                placed += 1;
            }
        }
    }

    tracing::debug!(placed, "preference pass done");
    placed
}
