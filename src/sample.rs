use crate::model::{Employee, Shift, DAYS_PER_WEEK};
use crate::scheduler::SchedError;

/// Jeu de démonstration : huit employés aux préférences variées.
pub fn sample_employees() -> Result<Vec<Employee>, SchedError> {
    use Shift::{Afternoon as A, Evening as E, Morning as M};

    let mut carol = [Some(M); DAYS_PER_WEEK];
    carol[..5].fill(Some(E));

    Ok(vec![
        Employee::new("Alan").prefer_every_day(M),
        Employee::new("Bob")
            .prefer_every_day(A)
            .with_ranking([A, E, M])?,
        Employee::new("Carol")
            .with_preferences(carol)
            .with_ranking([E, M, A])?,
        Employee::new("Dan").with_preferences([Some(M), Some(A), Some(E), Some(M), Some(A), Some(E), Some(M)]),
        Employee::new("Eve").with_preferences([Some(A), Some(A), Some(M), Some(M), Some(E), Some(A), Some(E)]),
        Employee::new("Frank").prefer_every_day(M),
        Employee::new("Grace").prefer_every_day(E),
        Employee::new("Heidi").with_preferences([None, Some(A), Some(A), Some(A), None, Some(M), Some(M)]),
    ])
}
