#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shift_roster::{
    io,
    report::{ScheduleRenderer, ScheduleReport, TextTable},
    sample::sample_employees,
    scheduler::{AssignOptions, Scheduler, ViolationKind},
    storage::{JsonStorage, RosterFile, Storage},
    Employee, DAY_NAMES,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning hebdomadaire (3 shifts/jour, préférences des employés)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Source des employés (une seule)
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Utiliser le jeu de démonstration
    #[arg(long)]
    sample: bool,
    /// Fichier roster `.csv` ou `.json`
    #[arg(long)]
    input: Option<String>,
    /// Saisie interactive sur stdin
    #[arg(long)]
    interactive: bool,
}

#[derive(Args, Debug)]
struct PlanOptions {
    /// Graine du tirage aléatoire (reproductible)
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 5)]
    max_days: u8,
    #[arg(long, default_value_t = 2)]
    min_coverage: usize,
    /// Plafond souple par cellule lors du passage préférences
    #[arg(long)]
    shift_capacity: Option<usize>,
}

impl PlanOptions {
    fn assign_options(&self) -> AssignOptions {
        AssignOptions {
            max_days_per_week: self.max_days,
            min_coverage: self.min_coverage,
            shift_capacity: self.shift_capacity,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Construire et afficher le planning de la semaine
    Plan {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        opts: PlanOptions,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Écrire le jeu de démonstration dans un fichier JSON
    Sample {
        #[arg(long)]
        out: String,
    },

    /// Construire le planning et vérifier les invariants
    Check {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        opts: PlanOptions,
    },
}

fn load_source(source: &Source) -> Result<Vec<Employee>> {
    let employees = if source.sample {
        sample_employees()?
    } else if let Some(path) = &source.input {
        io::load_employees(path)?
    } else {
        let stdin = std::io::stdin();
        io::read_employees_interactive(stdin.lock(), std::io::stdout())?
    };
    if employees.is_empty() {
        bail!("aucun employé à planifier");
    }
    Ok(employees)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Plan {
            source,
            opts,
            out_json,
            out_csv,
        } => {
            let employees = load_source(&source)?;
            let mut scheduler = Scheduler::try_new(employees, opts.assign_options())?;
            let outcome = scheduler.run(&mut opts.rng());
            let report = ScheduleReport::from_roster(scheduler.roster(), outcome.gaps, opts.seed);

            if let Some(path) = out_json {
                io::export_report_json(path, &report)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &report)?;
            }
            println!("\nFinal weekly schedule:\n");
            print!("{}", TextTable.render(&report));

            // Code 2 = WARNING/INCOMPLETE
            if report.is_complete() {
                0
            } else {
                2
            }
        }
        Commands::Sample { out } => {
            let storage = JsonStorage::open(&out)?;
            storage.save(&RosterFile {
                employees: sample_employees()?,
            })?;
            println!("Sample roster written to {out}");
            0
        }
        Commands::Check { source, opts } => {
            let employees = load_source(&source)?;
            let mut scheduler = Scheduler::try_new(employees, opts.assign_options())?;
            scheduler.run(&mut opts.rng());
            let violations = scheduler.validate();
            let hard: Vec<_> = violations
                .iter()
                .filter(|v| v.kind != ViolationKind::UnderCoverage)
                .collect();

            for v in &violations {
                let who = v
                    .employee
                    .and_then(|id| scheduler.roster().employee(id))
                    .map(|e| e.name.as_str())
                    .unwrap_or("-");
                let day = v.day.map(|d| DAY_NAMES[d]).unwrap_or("-");
                let shift = v.shift.map(|s| s.code()).unwrap_or("-");
                eprintln!("{:?}\t{who}\t{day}\t{shift}", v.kind);
            }

            if !hard.is_empty() {
                eprintln!("Found {} invariant violation(s)", hard.len());
                1
            } else if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                println!("OK: invariants hold, {} shift(s) under-covered", violations.len());
                2
            }
        }
    };

    std::process::exit(code);
}
