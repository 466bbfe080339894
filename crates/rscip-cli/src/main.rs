use clap::{Args, Parser, Subcommand, ValueEnum};
use rscip_core::ProblemData;
use rscip_scip::{Solution, scip_version, solve};
use rscip_solver::{
    DEFAULT_DISPLAY_WIDTH, DEFAULT_GAP, DEFAULT_THREADS, DEFAULT_TIME_LIMIT, SolveOptions,
};
use serde::Serialize;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve mixed-integer linear programs with SCIP")]
struct Cli {
    /// Log filter (for example `debug` or `rscip_scip=trace`); overrides RSCIP_TRACE
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a problem read from a JSON file
    Solve(SolveArgs),
    /// Print the linked SCIP version
    Version,
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// Problem file in rscip JSON form
    #[arg(long)]
    input: PathBuf,

    /// Relative optimality gap at which to stop
    #[arg(long, default_value_t = DEFAULT_GAP)]
    gap: f64,

    /// Time limit in seconds
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT)]
    time_limit: f64,

    /// Stop at the first feasible solution
    #[arg(long)]
    first_feasible: bool,

    /// Disable presolving and propagation rounds
    #[arg(long)]
    no_presolve: bool,

    /// Solver threads; more than one runs the parallel solver
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    threads: u32,

    /// Silence the SCIP log
    #[arg(long)]
    quiet: bool,

    /// Width of the SCIP log table
    #[arg(long, default_value_t = DEFAULT_DISPLAY_WIDTH)]
    display_width: u32,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct SolveRecord {
    objective_value: f64,
    values: Vec<f64>,
    status: i32,
    status_name: &'static str,
    has_solution: bool,
    solve_time_seconds: f64,
}

impl SolveRecord {
    fn from_solution(solution: Solution) -> Self {
        SolveRecord {
            objective_value: solution.objective_value(),
            status: solution.raw_status(),
            status_name: solution.status_string(),
            has_solution: solution.has_solution(),
            solve_time_seconds: solution.solve_time_seconds(),
            values: solution.into_values(),
        }
    }
}

impl SolveArgs {
    fn options(&self) -> SolveOptions {
        SolveOptions::new()
            .with_gap(self.gap)
            .with_time_limit(self.time_limit)
            .with_first_feasible(self.first_feasible)
            .with_presolve(!self.no_presolve)
            .with_threads(self.threads)
            .with_verbose(!self.quiet)
            .with_display_width(self.display_width)
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Command::Solve(args) => solve_command(&args),
        Command::Version => {
            println!("{}", scip_version());
            Ok(())
        }
    }
}

fn init_logging(level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("RSCIP_TRACE").ok())
        .unwrap_or_else(|| "warn".to_string());

    let filter = if level_value.eq_ignore_ascii_case("off") {
        EnvFilter::default().add_directive(LevelFilter::OFF.into())
    } else {
        EnvFilter::try_new(&level_value)
            .map_err(|err| format!("Invalid log filter {level_value:?}: {err}"))?
    };

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()?;
    Ok(())
}

fn solve_command(args: &SolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read {}: {err}", args.input.display()))?;
    let data = ProblemData::from_json(&text)?;
    let problem = data.as_problem()?;
    debug!(
        component = "cli",
        operation = "load_problem",
        status = "success",
        path = %args.input.display(),
        num_vars = problem.num_variables(),
        num_constraints = problem.num_constraints(),
        "Loaded problem"
    );

    let solution = solve(&problem, &args.options())?;
    let record = SolveRecord::from_solution(solution);
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Table => print_solution_table(&record),
    }
    Ok(())
}

fn print_solution_table(record: &SolveRecord) {
    println!(
        "status: {} ({})  objective: {}  time: {:.3}s",
        record.status_name, record.status, record.objective_value, record.solve_time_seconds
    );
    if !record.has_solution {
        println!("no solution found");
    }
    println!("{:>8} {:>16}", "index", "value");
    for (index, value) in record.values.iter().enumerate() {
        println!("{:>8} {:>16.6}", index, value);
    }
}
