use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;

use pass_o_mat::config::ConfigError;
use pass_o_mat::display::{Column, DisplayRow};
use pass_o_mat::horizon::{AxisMode, HorizonPlot, HorizonProjector};
use pass_o_mat::predict::{N2yoClient, TrackedSatellite};
use pass_o_mat::quality::{ClassifiedPass, QualityTier};
use pass_o_mat::session::RefreshSummary;
use pass_o_mat::{Config, Session, Settings};

#[derive(Parser)]
#[command(name = "pass-o-mat")]
#[command(about = "Weather satellite pass predictions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Validate { config: String },
    /// Fetch and list upcoming passes
    Passes {
        config: String,
        /// Sort by a column's displayed text; repeat to toggle direction
        #[arg(long)]
        sort: Vec<Column>,
        /// Sort by the pass field behind a column
        #[arg(long)]
        order_by: Option<Column>,
        #[arg(long, requires = "order_by")]
        descending: bool,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the horizon track of a table row (1-based)
    Plot {
        config: String,
        row: usize,
        /// Emit counter-clockwise-from-east angles
        #[arg(long)]
        pre_rotated: bool,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => validate(&config),
        Commands::Passes {
            config,
            sort,
            order_by,
            descending,
            json,
        } => passes(&config, &sort, order_by, descending, json),
        Commands::Plot {
            config,
            row,
            pre_rotated,
            json,
        } => plot(&config, row, pre_rotated, json),
    }
}

fn load(path: &str) -> Result<Settings, ConfigError> {
    Config::from_file(path)?.resolve()
}

fn open_session(path: &str) -> Result<Session<N2yoClient>, ConfigError> {
    let settings = load(path)?;
    let provider = settings.provider()?;
    Ok(Session::new(
        provider,
        settings.satellites.clone(),
        settings.converter,
    ))
}

fn validate(path: &str) -> ExitCode {
    let settings = match load(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Configuration is valid");
    println!(
        "  station: {} ({}, {}, {} m)",
        settings.station_name.as_deref().unwrap_or("unnamed"),
        settings.observer.latitude_deg,
        settings.observer.longitude_deg,
        settings.observer.altitude_m
    );
    println!("  time zone: {}", settings.converter.zone());
    println!(
        "  horizon: {} days, min elevation {}°, timeout {}",
        settings.request.days,
        settings.request.min_elevation_deg,
        humantime::format_duration(settings.timeout)
    );
    for (i, sat) in settings.satellites.iter().enumerate() {
        println!(
            "  {}: {} [{}] NORAD {}",
            i + 1,
            sat.name,
            sat.id,
            sat.norad_id
        );
    }
    ExitCode::SUCCESS
}

#[derive(Serialize)]
struct JsonRow<'a> {
    pass: &'a ClassifiedPass,
    display: &'a DisplayRow,
}

fn passes(
    path: &str,
    sort: &[Column],
    order_by: Option<Column>,
    descending: bool,
    json: bool,
) -> ExitCode {
    let mut session = match open_session(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let summary = session.refresh();
    report_warnings(&summary);

    for column in sort {
        session.sort_column(*column);
    }
    if let Some(column) = order_by {
        session.order_by(column, descending);
    }

    if json {
        let rows: Vec<_> = session
            .table()
            .into_iter()
            .map(|(pass, display)| JsonRow { pass, display })
            .collect();
        return match serde_json::to_string_pretty(&rows) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error serializing passes: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    print_legend(session.satellites());
    print_table(&session.rows());
    ExitCode::SUCCESS
}

fn plot(path: &str, row: usize, pre_rotated: bool, json: bool) -> ExitCode {
    let session = match open_session(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mode = if pre_rotated {
        AxisMode::PreRotated
    } else {
        AxisMode::RendererConfigured
    };
    let mut session = session.with_projector(HorizonProjector::new(mode));

    let summary = session.refresh();
    report_warnings(&summary);

    let Some(plot) = row.checked_sub(1).and_then(|i| session.select_row(i)) else {
        eprintln!("No row {} ({} passes loaded)", row, summary.pass_count);
        return ExitCode::FAILURE;
    };

    if json {
        return match serde_json::to_string_pretty(plot) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error serializing plot: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    print_plot(plot);
    ExitCode::SUCCESS
}

fn report_warnings(summary: &RefreshSummary) {
    for warning in &summary.warnings {
        eprintln!("Warning: {}: {}", warning.satellite, warning.error);
    }
}

fn print_legend(satellites: &[TrackedSatellite]) {
    let entries: Vec<String> = satellites
        .iter()
        .filter_map(|s| s.frequency.as_ref().map(|f| format!("{}: {}", s.name, f)))
        .collect();
    if !entries.is_empty() {
        println!("Frequencies: {}", entries.join("   "));
    }
    let tiers: Vec<String> = [QualityTier::High, QualityTier::Mid, QualityTier::Low]
        .iter()
        .map(|t| format!("[{}] {}", t.tag(), t.color()))
        .collect();
    println!("Quality: {}", tiers.join("   "));
    println!();
}

fn print_table(rows: &[&DisplayRow]) {
    let mut widths = Column::ALL.map(|c| c.to_string().chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = Column::ALL
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c.to_string(), w = w))
        .collect();
    println!("{}", header.join("  ").trim_end());

    for row in rows {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = w))
            .collect();
        println!("{}  [{}]", cells.join("  "), row.tier.tag());
    }

    if rows.is_empty() {
        println!("(no passes)");
    }
}

fn print_plot(plot: &HorizonPlot) {
    println!("{}", plot.title);
    let ticks: Vec<String> = plot
        .radial_ticks
        .iter()
        .map(|(r, label)| format!("{}@{}", label, r))
        .collect();
    println!("  elevation rings: {}", ticks.join(" "));
    for (i, trace) in plot.traces.iter().enumerate() {
        println!("  pass {}:", i + 1);
        for point in &trace.points {
            println!(
                "    theta {:.4} rad, radius {:.1}",
                point.theta, point.radius
            );
        }
        for note in &trace.annotations {
            println!(
                "    {} (theta {:.4}, radius {:.1})",
                note.text, note.at.theta, note.at.radius
            );
        }
    }
}
