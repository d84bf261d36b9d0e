use crate::model::{Roster, Shift, DAY_NAMES};
use crate::scheduler::CoverageGap;
use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Une ligne du tableau : un shift d'un jour.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReportRow {
    pub day: String,
    pub shift: Shift,
    pub employees: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmployeeTotal {
    pub name: String,
    pub days: u8,
}

/// Vue figée d'un planning terminé, prête à être affichée ou exportée.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleReport {
    pub generated_at: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
    pub rows: Vec<ReportRow>,
    pub totals: Vec<EmployeeTotal>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gaps: Vec<CoverageGap>,
}

impl ScheduleReport {
    /// Les totaux ne listent que les employés présents dans la grille, triés par nom.
    pub fn from_roster(roster: &Roster, gaps: Vec<CoverageGap>, seed: Option<u64>) -> Self {
        let schedule = roster.schedule();
        let name_of = |id| {
            roster
                .employee(id)
                .map(|e| e.name.clone())
                .unwrap_or_default()
        };

        let rows = schedule
            .cells()
            .map(|(day, shift, ids)| ReportRow {
                day: DAY_NAMES[day].to_string(),
                shift,
                employees: ids.iter().map(|&id| name_of(id)).collect(),
            })
            .collect();

        let totals = roster
            .totals()
            .into_iter()
            .filter(|&(_, days)| days > 0)
            .map(|(name, days)| EmployeeTotal {
                name: name.to_string(),
                days,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            seed,
            rows,
            totals,
            gaps,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Permet de customiser le rendu (texte, markdown, etc.).
pub trait ScheduleRenderer {
    fn render(&self, report: &ScheduleReport) -> String;
}

/// Tableau texte tabulé pour la console.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextTable;

impl ScheduleRenderer for TextTable {
    fn render(&self, report: &ScheduleReport) -> String {
        let mut out = format!("Day\tShift\tEmployees\n{}\n", "-".repeat(38));
        for row in &report.rows {
            let names = if row.employees.is_empty() {
                "-".to_string()
            } else {
                row.employees.join(",")
            };
            out.push_str(&format!("{}\t{}\t{}\n", row.day, row.shift, names));
        }

        out.push_str("\nEmployee totals (days assigned):\n");
        for t in &report.totals {
            out.push_str(&format!("{}: {} days\n", t.name, t.days));
        }

        if !report.gaps.is_empty() {
            out.push_str("\nUnder-covered shifts:\n");
            for g in &report.gaps {
                out.push_str(&format!(
                    "{} {}: {}/{}\n",
                    DAY_NAMES.get(g.day).copied().unwrap_or("?"),
                    g.shift,
                    g.staffed,
                    g.required
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Employee, EmployeeId};

    #[test]
    fn totals_skip_unplaced_and_sort_by_name() {
        let mut r = Roster::new(vec![
            Employee::new("zoe"),
            Employee::new("idle"),
            Employee::new("adam"),
        ]);
        r.assign(EmployeeId::new(0), 0, Shift::Morning, 5);
        r.assign(EmployeeId::new(2), 0, Shift::Morning, 5);
        r.assign(EmployeeId::new(2), 1, Shift::Evening, 5);
        let report = ScheduleReport::from_roster(&r, Vec::new(), None);
        let names: Vec<_> = report.totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["adam", "zoe"]);
        assert_eq!(report.totals[0].days, 2);
        assert_eq!(report.rows.len(), 21);
        assert_eq!(report.rows[0].employees, ["zoe", "adam"]);
    }

    #[test]
    fn text_table_marks_empty_cells() {
        let r = Roster::new(vec![Employee::new("a")]);
        let gaps = vec![CoverageGap {
            day: 6,
            shift: Shift::Evening,
            staffed: 0,
            required: 2,
        }];
        let out = TextTable.render(&ScheduleReport::from_roster(&r, gaps, Some(3)));
        assert!(out.starts_with("Day\tShift\tEmployees\n"));
        assert!(out.contains("Sun\tM\t-\n"));
        assert!(out.contains("Sat E: 0/2"));
    }
}
