use crate::scheduler::SchedError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nombre de jours planifiés (0 = dimanche).
pub const DAYS_PER_WEEK: usize = 7;
/// Nombre de shifts travaillés par jour.
pub const SHIFTS_PER_DAY: usize = 3;
/// Libellés courts des jours, index = jour.
pub const DAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Shift travaillé. L'absence de préférence est `Option::<Shift>::None`,
/// elle ne peut donc jamais entrer dans la grille.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    pub const ALL: [Shift; SHIFTS_PER_DAY] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    pub fn index(self) -> usize {
        match self {
            Shift::Morning => 0,
            Shift::Afternoon => 1,
            Shift::Evening => 2,
        }
    }

    /// Code court utilisé dans les tableaux (`M`, `A`, `E`).
    pub fn code(self) -> &'static str {
        match self {
            Shift::Morning => "M",
            Shift::Afternoon => "A",
            Shift::Evening => "E",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Shift {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_preference(s).ok_or_else(|| SchedError::UnknownShift(s.trim().to_string()))
    }
}

/// Parsing tolérant d'une préférence saisie à la main : tout mot commençant
/// par `m`, `a` ou `e` (casse ignorée). Le reste (`-`, vide...) = pas de préférence.
pub fn parse_preference(raw: &str) -> Option<Shift> {
    let lowered = raw.trim().to_lowercase();
    match lowered.chars().next()? {
        'm' => Some(Shift::Morning),
        'a' => Some(Shift::Afternoon),
        'e' => Some(Shift::Evening),
        _ => None,
    }
}

/// Identifiant d'un employé : sa position dans le roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmployeeId(usize);

impl EmployeeId {
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }
    pub fn index(self) -> usize {
        self.0
    }
}

pub const DEFAULT_RANKING: [Shift; SHIFTS_PER_DAY] = Shift::ALL;

fn default_ranking() -> [Shift; SHIFTS_PER_DAY] {
    DEFAULT_RANKING
}

/// Employé et ses préférences pour la semaine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Employee {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_per_day: [Option<Shift>; DAYS_PER_WEEK],
    #[cfg_attr(
        feature = "serde",
        serde(default = "default_ranking", deserialize_with = "deserialize_ranking")
    )]
    global_ranking: [Shift; SHIFTS_PER_DAY],
    #[cfg_attr(feature = "serde", serde(skip_deserializing, default))]
    assigned_days: u8,
}

impl Employee {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            preferred_per_day: [None; DAYS_PER_WEEK],
            global_ranking: DEFAULT_RANKING,
            assigned_days: 0,
        }
    }

    pub fn with_preferences(mut self, prefs: [Option<Shift>; DAYS_PER_WEEK]) -> Self {
        self.preferred_per_day = prefs;
        self
    }

    /// Même shift préféré tous les jours.
    pub fn prefer_every_day(self, shift: Shift) -> Self {
        self.with_preferences([Some(shift); DAYS_PER_WEEK])
    }

    pub fn prefer(mut self, day: usize, shift: Option<Shift>) -> Result<Self, SchedError> {
        let slot = self
            .preferred_per_day
            .get_mut(day)
            .ok_or(SchedError::InvalidDay(day))?;
        *slot = shift;
        Ok(self)
    }

    /// Le classement doit être une permutation des trois shifts.
    pub fn with_ranking(mut self, ranking: [Shift; SHIFTS_PER_DAY]) -> Result<Self, SchedError> {
        if !is_permutation(&ranking) {
            return Err(SchedError::InvalidRanking(format_ranking(&ranking)));
        }
        self.global_ranking = ranking;
        Ok(self)
    }

    pub fn preference(&self, day: usize) -> Option<Shift> {
        self.preferred_per_day.get(day).copied().flatten()
    }

    pub fn global_ranking(&self) -> &[Shift; SHIFTS_PER_DAY] {
        &self.global_ranking
    }

    pub fn assigned_days(&self) -> u8 {
        self.assigned_days
    }
}

fn is_permutation(ranking: &[Shift; SHIFTS_PER_DAY]) -> bool {
    Shift::ALL.iter().all(|s| ranking.contains(s))
}

fn format_ranking(ranking: &[Shift]) -> String {
    ranking.iter().map(|s| s.code()).collect::<Vec<_>>().join(",")
}

#[cfg(feature = "serde")]
fn deserialize_ranking<'de, D>(deserializer: D) -> Result<[Shift; SHIFTS_PER_DAY], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let ranking = <[Shift; SHIFTS_PER_DAY]>::deserialize(deserializer)?;
    if !is_permutation(&ranking) {
        return Err(serde::de::Error::custom(SchedError::InvalidRanking(
            format_ranking(&ranking),
        )));
    }
    Ok(ranking)
}

/// Grille jour × shift ; chaque cellule liste des identifiants d'employés
/// dans l'ordre d'insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    grid: [[Vec<EmployeeId>; SHIFTS_PER_DAY]; DAYS_PER_WEEK],
}

impl Schedule {
    pub fn cell(&self, day: usize, shift: Shift) -> &[EmployeeId] {
        self.grid
            .get(day)
            .map(|shifts| shifts[shift.index()].as_slice())
            .unwrap_or(&[])
    }

    /// Toutes les cellules, jour puis shift.
    pub fn cells(&self) -> impl Iterator<Item = (usize, Shift, &[EmployeeId])> + '_ {
        self.grid.iter().enumerate().flat_map(|(day, shifts)| {
            Shift::ALL
                .into_iter()
                .map(move |s| (day, s, shifts[s.index()].as_slice()))
        })
    }

    pub fn is_assigned_on(&self, id: EmployeeId, day: usize) -> bool {
        self.shift_on(id, day).is_some()
    }

    pub fn is_assigned_to(&self, id: EmployeeId, day: usize, shift: Shift) -> bool {
        self.cell(day, shift).contains(&id)
    }

    pub fn shift_on(&self, id: EmployeeId, day: usize) -> Option<Shift> {
        Shift::ALL
            .into_iter()
            .find(|&s| self.is_assigned_to(id, day, s))
    }

    /// Nombre de cellules contenant `id` sur la semaine.
    pub fn count_for(&self, id: EmployeeId) -> usize {
        self.cells()
            .map(|(_, _, ids)| ids.iter().filter(|&&x| x == id).count())
            .sum()
    }

    fn push(&mut self, day: usize, shift: Shift, id: EmployeeId) {
        self.grid[day][shift.index()].push(id);
    }
}

/// Roster complet : employés + planning. Seul `assign` modifie l'un ou l'autre.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: Vec<Employee>,
    schedule: Schedule,
}

impl Roster {
    /// Les compteurs `assigned_days` repartent de zéro.
    pub fn new(mut employees: Vec<Employee>) -> Self {
        for e in employees.iter_mut() {
            e.assigned_days = 0;
        }
        Self {
            employees,
            schedule: Schedule::default(),
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(id.index())
    }

    pub fn ids(&self) -> impl Iterator<Item = EmployeeId> {
        (0..self.employees.len()).map(EmployeeId::new)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn is_assigned_on(&self, id: EmployeeId, day: usize) -> bool {
        self.schedule.is_assigned_on(id, day)
    }

    pub fn is_assigned_to(&self, id: EmployeeId, day: usize, shift: Shift) -> bool {
        self.schedule.is_assigned_to(id, day, shift)
    }

    /// Place `id` sur (`day`, `shift`). No-op silencieux (retourne `false`) si
    /// l'employé travaille déjà ce jour-là, a atteint `max_days`, ou si
    /// l'identifiant / le jour est hors bornes.
    pub fn assign(&mut self, id: EmployeeId, day: usize, shift: Shift, max_days: u8) -> bool {
        if day >= DAYS_PER_WEEK {
            return false;
        }
        let Some(emp) = self.employees.get(id.index()) else {
            return false;
        };
        if emp.assigned_days >= max_days || self.schedule.is_assigned_on(id, day) {
            return false;
        }
        self.schedule.push(day, shift, id);
        self.employees[id.index()].assigned_days += 1;
        tracing::trace!(employee = %self.employees[id.index()].name, day, shift = %shift, "assigned");
        true
    }

    /// `(nom, jours)` trié par nom.
    pub fn totals(&self) -> Vec<(&str, u8)> {
        let mut out: Vec<(&str, u8)> = self
            .employees
            .iter()
            .map(|e| (e.name.as_str(), e.assigned_days))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}
