use crate::model::{parse_preference, Employee, Shift, DAYS_PER_WEEK, DAY_NAMES, SHIFTS_PER_DAY};
use crate::report::ScheduleReport;
use crate::storage::{JsonStorage, Storage};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// Import d'employés depuis CSV: header `name,sun,mon,tue,wed,thu,fri,sat[,ranking]`
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let mut prefs = [None; DAYS_PER_WEEK];
        for (day, slot) in prefs.iter_mut().enumerate() {
            *slot = rec.get(day + 1).and_then(parse_preference);
        }
        let mut employee = Employee::new(name).with_preferences(prefs);
        if let Some(raw) = rec.get(DAYS_PER_WEEK + 1) {
            let raw = raw.trim();
            if !raw.is_empty() {
                let ranking = parse_ranking(raw)
                    .with_context(|| format!("invalid ranking for employee {name}"))?;
                employee = employee.with_ranking(ranking)?;
            }
        }
        out.push(employee);
    }
    Ok(out)
}

/// Classement `m;e;a` (séparateurs `;`, `|` ou `,`), trois shifts distincts.
pub fn parse_ranking(raw: &str) -> anyhow::Result<[Shift; SHIFTS_PER_DAY]> {
    let parts: Vec<Shift> = raw
        .split([';', '|', ','])
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| chunk.parse::<Shift>())
        .collect::<Result<_, _>>()?;
    let ranking: [Shift; SHIFTS_PER_DAY] = match parts.as_slice() {
        [a, b, c] => [*a, *b, *c],
        _ => bail!("expected 3 shifts, got {}", parts.len()),
    };
    if !Shift::ALL.iter().all(|s| ranking.contains(s)) {
        bail!("ranking must list each shift once");
    }
    Ok(ranking)
}

/// Charge un roster d'employés : `.csv` ou JSON (`RosterFile`).
pub fn load_employees<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        import_employees_csv(path).with_context(|| format!("importing {}", path.display()))
    } else {
        Ok(JsonStorage::open(path)?.load()?.employees)
    }
}

/// Saisie interactive : nombre d'employés, nom, préférence par jour (m/a/e ou `-`),
/// puis classement séparé par des virgules. Un classement inutilisable garde le défaut.
pub fn read_employees_interactive<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> anyhow::Result<Vec<Employee>> {
    write!(output, "How many employees? ")?;
    output.flush()?;
    let count: usize = read_line(&mut input)?.trim().parse().unwrap_or(0);

    let mut employees = Vec::with_capacity(count);
    for i in 0..count {
        writeln!(output, "\nEmployee {} name: ", i + 1)?;
        let name = read_line(&mut input)?;
        let mut employee = Employee::new(name.trim());

        writeln!(output, "Enter preferred shift for each day (m/a/e) or '-' for no preference.")?;
        let mut prefs = [None; DAYS_PER_WEEK];
        for (slot, day_name) in prefs.iter_mut().zip(DAY_NAMES) {
            write!(output, "{day_name}: ")?;
            output.flush()?;
            *slot = parse_preference(&read_line(&mut input)?);
        }
        employee = employee.with_preferences(prefs);

        writeln!(
            output,
            "Enter global ranking as comma-separated from highest to lowest (example: morning,evening,afternoon):"
        )?;
        let raw = read_line(&mut input)?;
        if let Ok(ranking) = parse_ranking(&raw) {
            employee = employee.with_ranking(ranking)?;
        }
        employees.push(employee);
    }
    Ok(employees)
}

fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<String> {
    let mut buf = String::new();
    input.read_line(&mut buf).context("reading stdin")?;
    Ok(buf)
}

/// Export JSON du rapport (jolie mise en forme)
pub fn export_report_json<P: AsRef<Path>>(path: P, report: &ScheduleReport) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(report)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning: header `day,shift,employees`
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, report: &ScheduleReport) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["day", "shift", "employees"])?;
    for row in &report.rows {
        let names = if row.employees.is_empty() {
            "-".to_string()
        } else {
            row.employees.join(",")
        };
        w.write_record([row.day.as_str(), row.shift.code(), names.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_accepts_words_and_codes() {
        assert_eq!(
            parse_ranking("evening;morning;afternoon").unwrap(),
            [Shift::Evening, Shift::Morning, Shift::Afternoon]
        );
        assert_eq!(
            parse_ranking("a, e, m").unwrap(),
            [Shift::Afternoon, Shift::Evening, Shift::Morning]
        );
        assert!(parse_ranking("m;m;e").is_err());
        assert!(parse_ranking("m;a").is_err());
        assert!(parse_ranking("m;x;e").is_err());
    }

    #[test]
    fn interactive_entry() {
        let script = "2\nalice\nm\na\ne\n-\nmorning\n\nx\nevening,afternoon,morning\nbob\n-\n-\n-\n-\n-\n-\n-\nnope\n";
        let mut out = Vec::new();
        let emps = read_employees_interactive(script.as_bytes(), &mut out).unwrap();
        assert_eq!(emps.len(), 2);
        assert_eq!(emps[0].name, "alice");
        assert_eq!(emps[0].preference(0), Some(Shift::Morning));
        assert_eq!(emps[0].preference(3), None);
        assert_eq!(emps[0].preference(4), Some(Shift::Morning));
        assert_eq!(emps[0].preference(6), None);
        assert_eq!(emps[0].global_ranking()[0], Shift::Evening);
        assert_eq!(emps[1].preferred_per_day, [None; DAYS_PER_WEEK]);
        assert_eq!(emps[1].global_ranking(), &Shift::ALL);
        let prompts = String::from_utf8(out).unwrap();
        assert!(prompts.contains("Sat: "));
    }

    #[test]
    fn interactive_bad_count_means_nobody() {
        let emps = read_employees_interactive("lots\n".as_bytes(), Vec::new()).unwrap();
        assert!(emps.is_empty());
    }
}
