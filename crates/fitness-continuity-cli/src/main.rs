//! fitness-continuity CLI — `fitcon` command.
//!
//! Classifies measurements, backfills missed months, and records monthly
//! observations into a JSON record store.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use fitness_continuity::continuity::{self, ContinuityConfig};
use fitness_continuity::time::{format_date, parse_date};
use fitness_continuity::{
    age_as_of, compute_bmi, record_observation, BloodPressure, CalendarMonth, Classification,
    ClassificationPolicy, ContinuityEngine, JsonRecordStore, Measurements, MeasurementRecord,
    Observation, RecordStore, Sex, SubjectId, SubjectProfile,
};

// ── Directory helpers ─────────────────────────────────────────────────────────

/// `--data-dir`, else `$FITCON_DATA_DIR`, else `~/.fitcon/records`.
fn data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var("FITCON_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME not set; pass --data-dir")?;
    Ok(PathBuf::from(home).join(".fitcon").join("records"))
}

fn open_store(dir: &Path) -> Result<JsonRecordStore> {
    log::debug!("opening record store at {}", dir.display());
    JsonRecordStore::new(dir)
        .with_context(|| format!("failed to open record store at {}", dir.display()))
}

fn load_policy(path: Option<&Path>) -> Result<ClassificationPolicy> {
    match path {
        Some(p) => ClassificationPolicy::load(p)
            .with_context(|| format!("failed to load policy {}", p.display())),
        None => Ok(ClassificationPolicy::default()),
    }
}

// ── Parsing helpers ───────────────────────────────────────────────────────────

fn parse_sex(s: &str) -> Result<Sex> {
    Ok(s.parse::<Sex>()?)
}

fn parse_month(s: &str) -> Result<CalendarMonth> {
    s.parse::<CalendarMonth>()
        .with_context(|| format!("expected MM/YYYY, got '{s}'"))
}

/// `None` and `"N/A"` mean no reading; anything else must parse.
fn parse_bp(s: Option<&str>) -> Result<Option<BloodPressure>> {
    match s {
        None => Ok(None),
        Some(text) if text.trim().eq_ignore_ascii_case("n/a") => Ok(None),
        Some(text) => BloodPressure::parse(text)
            .map(Some)
            .ok_or_else(|| anyhow!("invalid blood pressure '{text}' (expected S/D, e.g. 120/80)")),
    }
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// fitness-continuity CLI — classify fitness measurements and keep monthly
/// records free of gaps.
#[derive(Parser, Debug)]
#[command(
    name = "fitcon",
    about = "fitness-continuity CLI",
    version,
    long_about = "fitcon — fitness-continuity CLI\n\nClassify BMI, waist and blood pressure readings, backfill missed months\nwith absence records, and record monthly observations."
)]
struct Cli {
    /// Record store directory (default: $FITCON_DATA_DIR or ~/.fitcon/records)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON file overriding classification thresholds
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify an already computed BMI
    Classify {
        /// Body-mass index (0 means the subject did not attend)
        #[arg(long)]
        bmi: f64,

        /// Sex (M or F)
        #[arg(long)]
        sex: String,

        /// Waist circumference in cm (0 = unmeasured)
        #[arg(long, default_value_t = 0.0)]
        waist: f64,

        /// Blood pressure as S/D (e.g. 120/80)
        #[arg(long)]
        bp: Option<String>,
    },

    /// Compute BMI from weight and height, apply the cap, and classify
    Assess {
        /// Weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in m
        #[arg(long)]
        height: f64,

        /// Sex (M or F)
        #[arg(long)]
        sex: String,

        /// Waist circumference in cm (0 = unmeasured)
        #[arg(long, default_value_t = 0.0)]
        waist: f64,

        /// Blood pressure as S/D (e.g. 120/80)
        #[arg(long)]
        bp: Option<String>,
    },

    /// Age in whole years on a given date
    Age {
        /// Date of birth (DD/MM/YYYY or YYYY-MM-DD)
        #[arg(long)]
        dob: String,

        /// Reference date (default: today)
        #[arg(long)]
        on: Option<String>,
    },

    /// Backfill absence records up to (not including) a month
    Reconcile {
        /// Subject identifier
        #[arg(long)]
        subject: String,

        /// Target month (MM/YYYY)
        #[arg(long)]
        month: String,

        /// Recorder identity stamped on absence records
        #[arg(long)]
        recorder: Option<String>,
    },

    /// Record a monthly observation (backfilling missed months first)
    Record {
        /// Subject identifier
        #[arg(long)]
        subject: String,

        /// Sex (M or F)
        #[arg(long)]
        sex: String,

        /// Observation date (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in m
        #[arg(long)]
        height: f64,

        /// Waist circumference in cm (0 = unmeasured)
        #[arg(long, default_value_t = 0.0)]
        waist: f64,

        /// Blood pressure as S/D (e.g. 120/80)
        #[arg(long)]
        bp: Option<String>,

        /// Date of birth (DD/MM/YYYY or YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,

        /// Unit the subject belongs to
        #[arg(long, default_value = "")]
        unit: String,

        /// Rank
        #[arg(long, default_value = "")]
        rank: String,

        /// Full name
        #[arg(long, default_value = "")]
        name: String,

        /// Who took the measurement
        #[arg(long, default_value = "fitcon")]
        recorder: String,
    },

    /// Show a subject's records and any monthly gaps
    History {
        /// Subject identifier
        #[arg(long)]
        subject: String,
    },

    /// List every record observed in a month
    Month {
        /// Month (MM/YYYY)
        #[arg(long)]
        month: String,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    let json = cli.json;

    let result = match cli.command {
        Commands::Classify {
            bmi,
            sex,
            waist,
            bp,
        } => load_policy(cli.policy.as_deref())
            .and_then(|policy| cmd_classify(&policy, bmi, &sex, waist, bp.as_deref(), json)),
        Commands::Assess {
            weight,
            height,
            sex,
            waist,
            bp,
        } => load_policy(cli.policy.as_deref()).and_then(|policy| {
            cmd_assess(&policy, weight, height, &sex, waist, bp.as_deref(), json, verbose)
        }),
        Commands::Age { dob, on } => cmd_age(&dob, on.as_deref()),
        Commands::Reconcile {
            subject,
            month,
            recorder,
        } => data_dir(cli.data_dir)
            .and_then(|dir| cmd_reconcile(&dir, &subject, &month, recorder, json, verbose)),
        Commands::Record {
            subject,
            sex,
            date,
            weight,
            height,
            waist,
            bp,
            dob,
            unit,
            rank,
            name,
            recorder,
        } => (|| -> Result<()> {
            let dir = data_dir(cli.data_dir)?;
            let policy = load_policy(cli.policy.as_deref())?;
            let sex = parse_sex(&sex)?;
            let mut profile = SubjectProfile::new(SubjectId::new(subject), sex);
            profile.date_of_birth = dob
                .as_deref()
                .map(parse_date)
                .transpose()
                .context("invalid --dob")?;
            profile.unit = unit;
            profile.rank = rank;
            profile.name = name;

            let observed_on = match date.as_deref() {
                Some(d) => parse_date(d).context("invalid --date")?,
                None => chrono::Local::now().date_naive(),
            };

            let observation = Observation {
                profile,
                observed_on,
                weight,
                height,
                waist,
                blood_pressure: parse_bp(bp.as_deref())?,
                recorded_by: recorder,
            };
            cmd_record(&dir, &policy, observation, json, verbose)
        })(),
        Commands::History { subject } => {
            data_dir(cli.data_dir).and_then(|dir| cmd_history(&dir, &subject, json, verbose))
        }
        Commands::Month { month } => {
            data_dir(cli.data_dir).and_then(|dir| cmd_month(&dir, &month, json))
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn print_classification(c: &Classification) {
    println!("  Verdict:        {}", c.verdict());
    println!("  Weight:         {}", c.weight_class.as_label());
    println!("  Blood pressure: {}", c.blood_pressure_class.as_label());
    println!("  Waist risk:     {}", c.waist_risk.as_label());
    if let Some(reason) = c.reason() {
        println!("  Reason:         {reason}");
    }
}

fn print_record_row(record: &MeasurementRecord) {
    let bp = record
        .blood_pressure
        .map(|bp| bp.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    println!(
        "{:<12} {:<10} {:>6.1} {:>6.1} {:>6.1} {:<8} {:<28} {}",
        format_date(record.observed_on),
        record.subject_id().as_str(),
        record.weight,
        record.bmi,
        record.waist,
        bp,
        record.classification().verdict(),
        record.motive,
    );
}

fn print_record_header() {
    println!(
        "{:<12} {:<10} {:>6} {:>6} {:>6} {:<8} {:<28} MOTIVE",
        "DATE", "SUBJECT", "WEIGHT", "BMI", "WAIST", "BP", "VERDICT"
    );
    println!("{}", "-".repeat(96));
}

// ── Command implementations ───────────────────────────────────────────────────

/// `fitcon classify --bmi BMI --sex SEX [--waist CM] [--bp S/D]`
fn cmd_classify(
    policy: &ClassificationPolicy,
    bmi: f64,
    sex: &str,
    waist: f64,
    bp: Option<&str>,
    json: bool,
) -> Result<()> {
    let sex = parse_sex(sex)?;
    // Malformed readings degrade to N/A rather than failing
    let reading = bp.and_then(BloodPressure::parse);
    let c = policy.classify(bmi, sex, waist, reading.as_ref());

    if json {
        return print_json(&c);
    }

    println!("Classification (BMI {bmi:.1}, {sex})");
    print_classification(&c);
    Ok(())
}

/// `fitcon assess --weight KG --height M --sex SEX [--waist CM] [--bp S/D]`
#[allow(clippy::too_many_arguments)]
fn cmd_assess(
    policy: &ClassificationPolicy,
    weight: f64,
    height: f64,
    sex: &str,
    waist: f64,
    bp: Option<&str>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let m = Measurements {
        sex: parse_sex(sex)?,
        weight,
        height,
        waist,
        blood_pressure: parse_bp(bp)?,
    };
    let assessment = policy.assess(&m);

    if json {
        return print_json(&assessment);
    }

    println!("Assessment");
    println!("  BMI:            {:.1}", assessment.bmi);
    if assessment.capped {
        println!(
            "  (capped from {:.1})",
            compute_bmi(m.weight, m.height)
        );
    }
    print_classification(&assessment.classification);

    if verbose {
        let t = policy.waist(m.sex);
        println!(
            "  Waist lines:    high risk {:.0}, very high {:.0}, cap below {:.0}",
            t.high_risk_from, t.very_high_risk_from, t.bmi_cap_waist_below
        );
    }
    Ok(())
}

/// `fitcon age --dob DATE [--on DATE]`
fn cmd_age(dob: &str, on: Option<&str>) -> Result<()> {
    let dob = parse_date(dob).context("invalid --dob")?;
    let reference = match on {
        Some(d) => parse_date(d).context("invalid --on")?,
        None => chrono::Local::now().date_naive(),
    };
    println!("{}", age_as_of(Some(dob), Some(reference)));
    Ok(())
}

/// `fitcon reconcile --subject ID --month MM/YYYY [--recorder NAME]`
fn cmd_reconcile(
    dir: &Path,
    subject: &str,
    month: &str,
    recorder: Option<String>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let target = parse_month(month)?;
    let store = open_store(dir)?;
    let config = recorder
        .map(|recorder| ContinuityConfig { recorder })
        .unwrap_or_default();
    let engine = ContinuityEngine::with_config(store, config);

    let outcome = engine
        .reconcile(&SubjectId::new(subject), target)
        .context("reconcile failed")?;

    if json {
        return print_json(&outcome);
    }

    if outcome.already_recorded {
        println!("Subject {subject} already has a record for {target}");
    } else if outcome.is_behind(target) {
        if let Some(latest) = outcome.latest_month {
            println!("Subject {subject} already has records up to {latest}; nothing to fill");
        }
    } else if outcome.latest_month.is_none() {
        println!("Subject {subject} has no history; nothing to fill");
    } else {
        println!(
            "Created {} absence record(s) for subject {subject} before {target}",
            outcome.created
        );
    }

    if verbose {
        println!("  Recorder:       {}", engine.config().recorder);
        println!("  Store:          {}", dir.display());
    }
    Ok(())
}

/// `fitcon record --subject ID --sex SEX --weight KG --height M ...`
fn cmd_record(
    dir: &Path,
    policy: &ClassificationPolicy,
    observation: Observation,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let engine = ContinuityEngine::new(open_store(dir)?);
    let outcome =
        record_observation(&engine, observation, policy).context("failed to record observation")?;
    let record = &outcome.record;

    if json {
        return print_json(record);
    }

    println!("Observation recorded");
    println!("  ID:             {}", record.id);
    println!("  Subject:        {}", record.subject_id());
    println!("  Date:           {}", format_date(record.observed_on));
    println!("  BMI:            {:.1}", record.bmi);
    println!("  Age:            {}", record.age);
    print_classification(&record.classification());
    if outcome.absences_created > 0 {
        println!("  Backfilled:     {} missed month(s)", outcome.absences_created);
    }

    if verbose {
        println!("  Recorder:       {}", record.recorded_by);
        println!("  Store:          {}", dir.display());
    }
    Ok(())
}

/// `fitcon history --subject ID`
fn cmd_history(dir: &Path, subject: &str, json: bool, verbose: bool) -> Result<()> {
    let store = open_store(dir)?;
    let history = store
        .history(&SubjectId::new(subject))
        .context("failed to read history")?;

    if json {
        return print_json(&history);
    }

    if history.is_empty() {
        println!("No records for subject {subject}");
        return Ok(());
    }

    print_record_header();
    for record in &history {
        print_record_row(record);
    }

    let gaps = continuity::detect_gaps(&history);
    if !gaps.is_empty() {
        let months: Vec<String> = gaps.iter().map(|m| m.to_string()).collect();
        println!();
        println!("Missing months: {}", months.join(", "));
    }

    if verbose {
        let absences = history.iter().filter(|r| r.is_absence()).count();
        println!();
        println!("{} record(s), {} absence(s)", history.len(), absences);
    }
    Ok(())
}

/// `fitcon month --month MM/YYYY`
fn cmd_month(dir: &Path, month: &str, json: bool) -> Result<()> {
    let month = parse_month(month)?;
    let store = open_store(dir)?;
    let records = store
        .records_in_month(month)
        .context("failed to scan record store")?;

    if json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("No records for {month}");
        return Ok(());
    }

    print_record_header();
    for record in &records {
        print_record_row(record);
    }
    Ok(())
}
