use agenda::assignment_parser::{format_example, parse_date};
use agenda::view::{render_day, render_upcoming};
use agenda::{AgendaConfig, Planner, Preferences, load_plan};
use anyhow::{Context, Result, bail};
use planner_core::BlockSchedule;
use std::path::PathBuf;
use std::{env, fs, io};

const USAGE: &str = "\
Usage: agenda [DATE] [PLAN]

DATE defaults to today. PLAN is a plan file, or '-' to read it from stdin;
without one PLANNER_PLAN_FILE is used. Relative dates in the plan are read
as of DATE.

A plan starts each course with a line such as

course: AP Bio | Smith | D, L

followed by its assignments, separated by blank lines.";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}\n\n{}", format_example());
        return Ok(());
    }

    planner_shared::bootstrap::init_env();

    // The guard must be kept alive for the duration of the program to ensure logs are flushed
    let _guard = planner_shared::bootstrap::init_tracing("agenda");

    let config = AgendaConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let today = config.today();
    let mut args = args.into_iter().peekable();
    let date = match args.peek().map(|arg| parse_date(arg, today)) {
        Some(Ok(date)) => {
            args.next();
            date
        }
        _ => today,
    };
    let plan = args.next().map(PathBuf::from).or(config.plan_file.clone());
    if let Some(extra) = args.next() {
        bail!("Unexpected argument: {extra}\n\n{USAGE}");
    }
    tracing::info!(%today, %date, "Rendering agenda");

    let mut planner = Planner::new(BlockSchedule::standard());
    match plan {
        Some(path) => {
            let text = if path.as_os_str() == "-" {
                io::read_to_string(io::stdin()).context("Failed to read plan from stdin")?
            } else {
                fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read plan file {}", path.display()))?
            };
            let summary = load_plan(&mut planner, &text, date)?;
            tracing::info!(
                courses = summary.courses,
                assignments = summary.assignments,
                skipped = summary.skipped,
                "Plan loaded"
            );
        }
        None => tracing::warn!("No plan given, rendering the bare block schedule"),
    }

    let preferences = Preferences::from_config(&config);

    print!("{}", render_day(&planner.day_view(date)));
    println!();
    print!(
        "{}",
        render_upcoming(
            &planner.upcoming(date, &preferences),
            preferences.display_on_due()
        )
    );

    Ok(())
}
