mod cli;

use burndown_core::chart::{self, PointSeries};
use burndown_core::config::{self, Config, ConfigOverrides};
use burndown_core::error::AppError;
use burndown_core::storage::json_store;
use clap::Parser;
use cli::{Cli, Command, ConfigOverrideTarget};
use tabled::{Table, Tabled};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Points")]
    points: u64,
}

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Member")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Completed points")]
    points: u64,
}

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, AppError> {
    timestamp
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

fn print_series_table(series: &PointSeries) -> Result<(), AppError> {
    let mut rows = Vec::with_capacity(series.len());
    for point in series.points() {
        rows.push(SeriesRow {
            timestamp: format_timestamp(point.timestamp)?,
            points: point.cumulative_points,
        });
    }
    println!("{}", Table::new(rows));
    println!("Total: {} points", series.total_points());
    Ok(())
}

fn print_series_json(series: &PointSeries, config: &Config) -> Result<(), AppError> {
    let mut points = Vec::with_capacity(series.len());
    for point in series.points() {
        points.push(serde_json::json!({
            "timestamp": format_timestamp(point.timestamp)?,
            "cumulativePoints": point.cumulative_points,
        }));
    }
    let payload = serde_json::json!({
        "interpolation": config.interpolation_or_default(),
        "distinctValues": series.distinct_cumulative_values(),
        "points": points,
    });
    println!("{payload}");
    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    let load = config::load_config_with_fallback();
    if let Some(err) = load.error {
        eprintln!("WARNING: {err}");
    }

    let mut overrides = ConfigOverrides::default();
    for raw in &cli.config_override {
        let parsed = cli::parse_config_override(raw).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Interpolation => overrides.interpolation = Some(parsed.value),
            ConfigOverrideTarget::DefaultMember => overrides.default_member = Some(parsed.value),
        }
    }

    config::merge_overrides(&load.config, &overrides)
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(&cli)?;

    let store_path = match cli.store.clone() {
        Some(path) => path,
        None => json_store::snapshot_path()?,
    };
    let snapshot = json_store::load_snapshot(&store_path)?;

    let created_at = OffsetDateTime::parse(&snapshot.created_at, &Rfc3339)
        .map_err(|_| AppError::invalid_data("snapshot created_at must be RFC3339"))?;
    let now = OffsetDateTime::now_utc();

    match cli.command {
        Command::Team => {
            let series = chart::team_series(&snapshot.tasks, now, created_at)?;
            if cli.json {
                print_series_json(&series, &config)?;
            } else {
                println!("Team task progression");
                print_series_table(&series)?;
            }
        }
        Command::Personal { member } => {
            let member = member
                .or_else(|| config.default_member.clone())
                .ok_or_else(|| {
                    AppError::invalid_input(
                        "member email is required (pass EMAIL or set default_member)",
                    )
                })?;
            let series = chart::personal_series(&snapshot.tasks, now, created_at, &member)?;
            if cli.json {
                print_series_json(&series, &config)?;
            } else if series.distinct_cumulative_values() < 2 {
                // Same empty-state rule the dashboard applies to flat charts.
                println!("No completed tasks for {member} yet, nothing to chart.");
            } else {
                println!("Personal task progression for {member}");
                print_series_table(&series)?;
            }
        }
        Command::Summary => {
            let summary = chart::progress_summary(&snapshot.tasks);
            let members = chart::completed_points_by_member(&snapshot.tasks);
            if cli.json {
                let payload = serde_json::json!({
                    "totalPoints": summary.total_points,
                    "completedPoints": summary.completed_points,
                    "percentComplete": summary.percent_complete(),
                    "members": members.iter().map(|member| serde_json::json!({
                        "name": member.name,
                        "email": member.email,
                        "completedPoints": member.completed_points,
                    })).collect::<Vec<_>>(),
                });
                println!("{payload}");
            } else {
                let rows: Vec<MemberRow> = members
                    .into_iter()
                    .map(|member| MemberRow {
                        name: member.name,
                        email: member.email,
                        points: member.completed_points,
                    })
                    .collect();
                println!("{}", Table::new(rows));
                println!(
                    "Completed {} of {} points ({}%)",
                    summary.completed_points,
                    summary.total_points,
                    summary.percent_complete()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help and version render on stdout and are not failures.
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
