//! liftlog - Strength training log with progress analytics

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use liftlog::analytics::{Analytics, TimeRange};
use liftlog::store::{JsonSnapshotStore, WorkoutStore};

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(author, version, about = "Strength training log with progress analytics")]
struct Cli {
    /// Snapshot file with workouts and weight log
    #[arg(short, long, env = "LIFTLOG_DATA", default_value = "liftlog.json")]
    data: String,

    /// User whose logs to analyse
    #[arg(short, long, env = "LIFTLOG_USER", default_value = "1")]
    user: i64,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Overview of every view
    Summary {
        /// Window for muscle focus (week, month, year, all)
        #[arg(short, long, default_value = "month")]
        range: TimeRange,
    },

    /// Consecutive training days ending today
    Streak,

    /// Volume per workout
    Volume {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Muscle group focus
    Muscles {
        /// Window (week, month, year, all)
        #[arg(short, long, default_value = "month")]
        range: TimeRange,
    },

    /// Personal record timeline
    Prs,

    /// Progressive overload trends
    Overload,

    /// Body weight series
    Weight,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_streak(analytics: &Analytics) {
    println!("Streak: {} day(s)", analytics.streak());
}

fn print_volume(analytics: &Analytics, limit: usize) {
    println!("Workout volume");
    println!("{:-<50}", "");
    for (workout, summary) in analytics.workouts().iter().zip(analytics.volumes()).take(limit) {
        println!(
            "{} | {:24} | {:>9.1} kg",
            workout.date.format("%Y-%m-%d"),
            workout.name,
            summary.total_kg
        );
    }
    println!("Total: {:.1} kg", analytics.total_volume());
}

fn print_muscles(analytics: &Analytics, range: TimeRange) {
    println!("Muscle focus ({})", range);
    println!("{:-<40}", "");
    let shares = analytics.muscle_distribution(range);
    if shares.is_empty() {
        println!("No workouts in range");
    }
    for share in shares {
        let bar = "#".repeat((share.percent / 5.0).round() as usize);
        println!("{:12} {:>3}% {}", share.muscle, share.rounded_percent(), bar);
    }
}

fn print_prs(analytics: &Analytics) {
    println!("Personal records");
    println!("{:-<50}", "");
    for pr in analytics.personal_records() {
        println!(
            "{} | {:24} | {} kg x {}",
            pr.date.format("%Y-%m-%d"),
            pr.display,
            pr.weight,
            pr.reps
        );
    }
}

fn print_overload(analytics: &Analytics) {
    println!("Progressive overload");
    println!("{:-<50}", "");
    for trend in analytics.overload() {
        println!(
            "{} {:24} {:>+6.1}% ({:.0} -> {:.0})",
            trend.status.arrow(),
            trend.display,
            trend.change_percent,
            trend.old_best,
            trend.recent_best
        );
    }
}

fn print_weight(analytics: &Analytics) {
    let series = analytics.weight_series();
    println!("Body weight");
    println!("{:-<40}", "");
    let ticks: Vec<String> = series.y_ticks.iter().map(|t| format!("{:.0}", t)).collect();
    println!("Scale: {}", ticks.join(" / "));
    for point in &series.points {
        println!("{} | {:>6.1} kg", point.date.format("%d.%m.%Y"), point.weight);
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = JsonSnapshotStore::open(&cli.data)?;
    let workouts = store.fetch_workouts(cli.user)?;
    let weight_log = store.fetch_weight_log(cli.user)?;
    info!(
        path = %store.path().display(),
        user = cli.user,
        workouts = workouts.len(),
        "running analytics"
    );

    let analytics = Analytics::new(workouts, weight_log, Local::now().date_naive());
    let command = cli.command.unwrap_or(Commands::Summary { range: TimeRange::Month });

    match command {
        Commands::Summary { range } => {
            if cli.json {
                return print_json(&analytics.report(range));
            }
            print_streak(&analytics);
            println!();
            print_volume(&analytics, 5);
            println!();
            print_muscles(&analytics, range);
            println!();
            print_prs(&analytics);
            println!();
            print_overload(&analytics);
        }

        Commands::Streak if cli.json => print_json(&analytics.streak())?,
        Commands::Streak => print_streak(&analytics),

        Commands::Volume { limit } if cli.json => {
            let volumes: Vec<_> = analytics.volumes().into_iter().take(limit).collect();
            print_json(&volumes)?
        }
        Commands::Volume { limit } => print_volume(&analytics, limit),

        Commands::Muscles { range } if cli.json => print_json(&analytics.muscle_distribution(range))?,
        Commands::Muscles { range } => print_muscles(&analytics, range),

        Commands::Prs if cli.json => print_json(&analytics.personal_records())?,
        Commands::Prs => print_prs(&analytics),

        Commands::Overload if cli.json => print_json(&analytics.overload())?,
        Commands::Overload => print_overload(&analytics),

        Commands::Weight if cli.json => print_json(&analytics.weight_series())?,
        Commands::Weight => print_weight(&analytics),
    }

    Ok(())
}
