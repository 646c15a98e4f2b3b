use anyhow::{bail, Context, Result};
use campus_timetable_engine::parser::{load_config_or_default, validate_config};
use campus_timetable_engine::reporter::{generate_reports, load_report, print_summary, OutputFormat};
use campus_timetable_engine::scheduler::generate_timetables;
use campus_timetable_engine::types::{Config, SubjectConfig, Year, YearConfig};
use campus_timetable_engine::validator::validate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campus-timetable-engine")]
#[command(about = "Constraint-based multi-year timetable construction engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a timetable for one or more academic years from a config file
    Generate {
        /// Path to a TOML or JSON config file
        #[arg(short, long, default_value = "./config.toml")]
        config: PathBuf,

        /// Comma-separated years to build: SY, TY, BTech (default: all three)
        #[arg(short, long)]
        years: Option<String>,

        /// Output directory for generated reports
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// RNG seed, for a reproducible run
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Suppress the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-validate a previously generated report file
    Validate {
        /// Path to a `<year>.json` report written by `generate`
        #[arg(short, long)]
        report: PathBuf,

        /// Show every diagnostic, not just the summary
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the pipeline against a small built-in config, for a quick look
    Demo {
        /// Output directory for generated reports
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            years,
            output,
            format,
            seed,
            quiet,
        } => run_generate(&config, years.as_deref(), &output, &format, seed, quiet),
        Commands::Validate { report, verbose } => run_validate(&report, verbose),
        Commands::Demo { output } => run_demo(&output),
    }
}

fn parse_years(spec: Option<&str>) -> Result<Vec<Year>> {
    match spec {
        None => Ok(Year::default_priority_order().to_vec()),
        Some(spec) => spec
            .split(',')
            .map(|s| match s.trim() {
                "SY" => Ok(Year::Sy),
                "TY" => Ok(Year::Ty),
                "BTech" => Ok(Year::BTech),
                other => bail!("unknown year '{other}', expected SY, TY, or BTech"),
            })
            .collect(),
    }
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format.eq_ignore_ascii_case("all") {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }
    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn run_generate(
    config_path: &PathBuf,
    years: Option<&str>,
    output: &PathBuf,
    format: &str,
    seed: u64,
    quiet: bool,
) -> Result<()> {
    let config = load_config_or_default(config_path).context("failed to load config")?;
    let config_warnings = validate_config(&config);
    if !quiet {
        for w in &config_warnings {
            println!("{} {}", "warning:".yellow(), w);
        }
    }

    let years = parse_years(years)?;
    let formats = parse_formats(format);

    let (schedules, diagnostics, elapsed) = generate_timetables(&config, &years, seed, quiet);

    for schedule in &schedules {
        let report = validate(&schedule.dataset, &schedule.state, schedule.year);
        generate_reports(&schedule.dataset, &schedule.state, &report, output, &formats)?;
        if !quiet {
            print_summary(&report);
        }
    }

    if !quiet {
        println!(
            "built {} year(s) in {:?}, {} total diagnostic(s)",
            schedules.len(),
            elapsed,
            diagnostics.len()
        );
        println!("reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(report_path: &PathBuf, verbose: bool) -> Result<()> {
    let (year, dataset, state) = load_report(report_path).context("failed to load report")?;
    let report = validate(&dataset, &state, year);

    print_summary(&report);
    if verbose {
        for d in &report.diagnostics {
            println!("  ! {d}");
        }
    }

    if !report.is_feasible {
        bail!("{year} is not feasible (hard cost {:.1})", report.hard_cost);
    }
    Ok(())
}

fn run_demo(output: &PathBuf) -> Result<()> {
    println!("{}", "Campus Timetable Engine Demo".bold().cyan());
    println!("{}", "-".repeat(40));

    let config = demo_config();
    let years = Year::default_priority_order().to_vec();
    let (schedules, diagnostics, elapsed) = generate_timetables(&config, &years, 7, false);

    for schedule in &schedules {
        let report = validate(&schedule.dataset, &schedule.state, schedule.year);
        generate_reports(
            &schedule.dataset,
            &schedule.state,
            &report,
            output,
            &[OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text],
        )?;
        print_summary(&report);
    }

    println!(
        "built {} year(s) in {:?}, {} total diagnostic(s)",
        schedules.len(),
        elapsed,
        diagnostics.len()
    );
    println!("reports written to: {}", output.display().to_string().green());
    Ok(())
}

fn demo_config() -> Config {
    let mut years = BTreeMap::new();
    years.insert(
        Year::Sy,
        YearConfig {
            semester: Some("I".to_string()),
            subjects: vec![
                SubjectConfig {
                    name: "Engineering Mathematics".to_string(),
                    hours: 4,
                    labs: 0,
                    lab_name: None,
                    lab_hours: 0,
                },
                SubjectConfig {
                    name: "Programming Fundamentals".to_string(),
                    hours: 3,
                    labs: 1,
                    lab_name: Some("Programming Lab".to_string()),
                    lab_hours: 2,
                },
            ],
        },
    );
    years.insert(
        Year::Ty,
        YearConfig {
            semester: Some("I".to_string()),
            subjects: vec![SubjectConfig {
                name: "Database Systems".to_string(),
                hours: 3,
                labs: 1,
                lab_name: Some("Database Lab".to_string()),
                lab_hours: 2,
            }],
        },
    );
    years.insert(
        Year::BTech,
        YearConfig {
            semester: Some("I".to_string()),
            subjects: vec![SubjectConfig {
                name: "Distributed Systems".to_string(),
                hours: 3,
                labs: 1,
                lab_name: Some("Networks Lab".to_string()),
                lab_hours: 2,
            }],
        },
    );

    let mut batches = BTreeMap::new();
    batches.insert(Year::Sy, 2);
    batches.insert(Year::Ty, 2);
    batches.insert(Year::BTech, 1);

    Config {
        num_classrooms: 4,
        num_labs: 2,
        lab_names: Some(vec!["Lab A".to_string(), "Lab B".to_string()]),
        batches,
        timings: Default::default(),
        years,
    }
}
