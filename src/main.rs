use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

use vitalog::config::{default_config_path, AppConfig};
use vitalog::logging::{init_logging, LogLevel};
use vitalog::models::DailyRecord;
use vitalog::stats::StatsEngine;
use vitalog::store::{MemoryStore, Snapshot};
use vitalog::validate::{validate_daily_record, validate_exercise_plan, validate_profile};

/// vitalog - Personal Health Statistics CLI
///
/// Tracks body-weight, exercise and diet records and derives health
/// metrics: BMI, completion rates, logging regularity grades and
/// recommendations.
#[derive(Parser)]
#[command(name = "vitalog")]
#[command(version = "0.1.0")]
#[command(about = "Personal Health Statistics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import records into the data file
    Import {
        /// Input file path (JSON snapshot or daily-record CSV)
        #[arg(short, long)]
        file: PathBuf,

        /// File format (inferred from the extension if not specified)
        #[arg(short = 'f', long)]
        format: Option<String>,
    },

    /// Compute and display statistics
    Stats {
        /// Statistic kind to compute
        #[arg(short, long, value_enum)]
        kind: Kind,

        /// User name (falls back to the configured default user)
        #[arg(short, long)]
        user: Option<String>,

        /// Window start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Window end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Check all stored records for out-of-range values
    Validate,

    /// Show or change configuration
    Config {
        /// List the current configuration
        #[arg(short, long)]
        list: bool,

        /// Set the default user
        #[arg(long, value_name = "NAME")]
        set_user: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Health,
    Exercise,
    Diet,
}

#[derive(Tabled)]
struct MetricRow {
    metric: &'static str,
    value: String,
}

#[derive(Tabled)]
struct CountRow {
    label: String,
    count: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&config_path)?;

    let mut log_config = config.logging.clone();
    if cli.verbose > 0 {
        log_config.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&log_config)?;

    match cli.command {
        Commands::Import { file, format } => import(&config, &file, format.as_deref()),
        Commands::Stats {
            kind,
            user,
            from,
            to,
        } => stats(&config, kind, user, from, to),
        Commands::Validate => validate(&config),
        Commands::Config { list, set_user } => {
            configure(&mut config, &config_path, list, set_user)
        }
    }
}

fn load_store(config: &AppConfig) -> Result<MemoryStore> {
    let path = &config.settings.data_file;
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read data file {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse data file {}", path.display()))?;
    Ok(snapshot.into_store())
}

fn save_store(config: &AppConfig, store: &MemoryStore) -> Result<()> {
    let path = &config.settings.data_file;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data dir {}", parent.display()))?;
    }
    let snapshot = Snapshot::from_store(store);
    let content = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, content)
        .with_context(|| format!("failed to write data file {}", path.display()))?;
    Ok(())
}

fn import(config: &AppConfig, file: &Path, format: Option<&str>) -> Result<()> {
    println!("{}", "Importing records...".green().bold());

    let format = match format {
        Some(f) => f.to_lowercase(),
        None => file
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase(),
    };

    let mut store = load_store(config)?;
    let imported = match format.as_str() {
        "json" => {
            let content = fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let snapshot: Snapshot =
                serde_json::from_str(&content).context("failed to parse JSON snapshot")?;
            let mut count = 0usize;
            for profile in snapshot.profiles {
                store.put_profile(profile);
                count += 1;
            }
            for record in snapshot.daily_records {
                store.put_daily_record(record);
                count += 1;
            }
            for plan in snapshot.exercise_plans {
                store.put_exercise_plan(plan);
                count += 1;
            }
            for record in snapshot.diet_records {
                store.put_diet_record(record);
                count += 1;
            }
            count
        }
        "csv" => {
            let mut reader = csv::Reader::from_path(file)
                .with_context(|| format!("failed to open {}", file.display()))?;
            let mut count = 0usize;
            for result in reader.deserialize::<DailyRecord>() {
                let record = result.context("failed to parse CSV daily record")?;
                store.put_daily_record(record);
                count += 1;
            }
            count
        }
        other => bail!("unsupported import format '{}', use json or csv", other),
    };

    save_store(config, &store)?;
    println!(
        "{}",
        format!("✓ Imported {} records", imported).green()
    );
    Ok(())
}

fn parse_window(from: Option<String>, to: Option<String>) -> Result<Option<(NaiveDate, NaiveDate)>> {
    match (from, to) {
        (Some(from), Some(to)) => {
            let start = NaiveDate::parse_from_str(&from, "%Y-%m-%d")
                .with_context(|| format!("invalid --from date '{}'", from))?;
            let end = NaiveDate::parse_from_str(&to, "%Y-%m-%d")
                .with_context(|| format!("invalid --to date '{}'", to))?;
            if end < start {
                bail!("--to date is before --from date");
            }
            Ok(Some((start, end)))
        }
        (None, None) => Ok(None),
        _ => bail!("--from and --to must be given together"),
    }
}

fn resolve_user(config: &AppConfig, user: Option<String>) -> Result<String> {
    user.or_else(|| config.settings.default_user.clone())
        .context("no user given and no default user configured")
}

fn stats(
    config: &AppConfig,
    kind: Kind,
    user: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let store = load_store(config)?;
    let engine = StatsEngine::new(&store);
    let user = resolve_user(config, user)?;
    let window = parse_window(from, to)?;

    match kind {
        Kind::Health => {
            let health = engine
                .health_stats(&user, window)
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;

            println!("{}", format!("Health statistics for {}", user).blue().bold());
            let rows = vec![
                MetricRow {
                    metric: "BMI",
                    value: health.bmi_summary(),
                },
                MetricRow {
                    metric: "Weight change",
                    value: health.weight_summary(),
                },
                MetricRow {
                    metric: "Goal progress",
                    value: format!("{:.0}%", health.goal_progress),
                },
                MetricRow {
                    metric: "Exercise completion",
                    value: format!("{:.1}%", health.exercise_completion_rate),
                },
                MetricRow {
                    metric: "Diet logging",
                    value: format!("{:.1}%", health.diet_record_frequency),
                },
                MetricRow {
                    metric: "Regularity",
                    value: format!(
                        "{} - {}",
                        health.regularity_grade,
                        health.regularity_grade.description()
                    ),
                },
            ];
            println!("{}", Table::new(rows));
            print_recommendations(&health.recommendations);
        }
        Kind::Exercise => {
            let exercise = engine.exercise_stats(&user, window);

            println!(
                "{}",
                format!("Exercise statistics for {}", user).blue().bold()
            );
            let rows = vec![
                MetricRow {
                    metric: "Plans",
                    value: format!(
                        "{} total, {} completed",
                        exercise.total_plans, exercise.completed_plans
                    ),
                },
                MetricRow {
                    metric: "Completion",
                    value: exercise.completion_summary(),
                },
                MetricRow {
                    metric: "Duration",
                    value: exercise.duration_summary(),
                },
                MetricRow {
                    metric: "Active days",
                    value: exercise.active_days.to_string(),
                },
                MetricRow {
                    metric: "Top types",
                    value: exercise.top_types.join(", "),
                },
            ];
            println!("{}", Table::new(rows));

            if !exercise.type_distribution.is_empty() {
                println!("{}", "By type".cyan());
                let rows: Vec<CountRow> = exercise
                    .type_distribution
                    .iter()
                    .map(|(label, count)| CountRow {
                        label: label.to_string(),
                        count,
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
            print_recommendations(&exercise.recommendations);
        }
        Kind::Diet => {
            let diet = engine.diet_stats(&user, window);

            println!("{}", format!("Diet statistics for {}", user).blue().bold());
            let rows = vec![
                MetricRow {
                    metric: "Records",
                    value: format!(
                        "{} over {} days",
                        diet.total_records, diet.days_with_records
                    ),
                },
                MetricRow {
                    metric: "Frequency",
                    value: diet.frequency_summary(),
                },
                MetricRow {
                    metric: "Meals",
                    value: format!(
                        "breakfast {}, lunch {}, dinner {}",
                        diet.meal_completion.breakfast,
                        diet.meal_completion.lunch,
                        diet.meal_completion.dinner
                    ),
                },
                MetricRow {
                    metric: "Streak",
                    value: format!("{} days", diet.consecutive_days),
                },
                MetricRow {
                    metric: "Meals per day",
                    value: format!("{:.1}", diet.avg_meals_per_day),
                },
                MetricRow {
                    metric: "Regularity",
                    value: diet.regularity_summary(),
                },
            ];
            println!("{}", Table::new(rows));

            if !diet.food_distribution.is_empty() {
                println!("{}", "Food preferences".cyan());
                let rows: Vec<CountRow> = diet
                    .food_distribution
                    .top_n(10)
                    .into_iter()
                    .map(|(label, count)| CountRow { label, count })
                    .collect();
                println!("{}", Table::new(rows));
            }
            print_recommendations(&diet.recommendations);
        }
    }

    Ok(())
}

fn print_recommendations(recommendations: &[String]) {
    println!("{}", "Recommendations".yellow().bold());
    for rec in recommendations {
        println!("  • {}", rec);
    }
}

fn validate(config: &AppConfig) -> Result<()> {
    println!("{}", "Validating stored records...".cyan().bold());

    let store = load_store(config)?;
    let mut issue_count = 0usize;

    for user in store.users() {
        use vitalog::store::RecordStore;

        if let Some(profile) = store.get_profile(&user) {
            if let Err(issues) = validate_profile(&profile) {
                for issue in &issues {
                    println!("  {} profile: {}", user.red(), issue);
                }
                issue_count += issues.len();
            }
        }
        for record in store.list_daily_records(&user) {
            if let Err(issues) = validate_daily_record(&record) {
                for issue in &issues {
                    println!("  {} daily {}: {}", user.red(), record.date, issue);
                }
                issue_count += issues.len();
            }
        }
        for plan in store.list_exercise_plans(&user) {
            if let Err(issues) = validate_exercise_plan(&plan) {
                for issue in &issues {
                    println!("  {} plan {}: {}", user.red(), plan.date, issue);
                }
                issue_count += issues.len();
            }
        }
    }

    if issue_count == 0 {
        println!("{}", "✓ All records look valid".green());
    } else {
        println!("{}", format!("Found {} issues", issue_count).yellow());
    }
    Ok(())
}

fn configure(
    config: &mut AppConfig,
    path: &Path,
    list: bool,
    set_user: Option<String>,
) -> Result<()> {
    if let Some(user) = set_user {
        config.settings.default_user = Some(user.clone());
        config.save(path)?;
        println!("{}", format!("✓ Default user set to {}", user).green());
    } else if list {
        println!("{}", "Current configuration".white().bold());
        println!("  config file: {}", path.display());
        println!("  data file:   {}", config.settings.data_file.display());
        println!(
            "  default user: {}",
            config.settings.default_user.as_deref().unwrap_or("(none)")
        );
        println!("  log level:   {:?}", config.logging.level);
    } else {
        println!("Use --list to show or --set-user to change the configuration");
    }
    Ok(())
}
