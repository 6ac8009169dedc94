use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dosel::{
    drug_summaries, render_drug_table, render_error, render_response, Config,
    Interpreter, InterpreterError, JsonFileStore, OutputFormat, RegimenStore, Response,
};
use dosel_rules::{RuleRegistry, BUILTIN_RULES};
use dosel_type::ExecutionError;
use log::{debug, LevelFilter};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "dosel",
    version,
    about = "Dose calculation and prescription checks in a small medical command language",
    long_about = "dosel runs commands of the dosel medical command language.\n\n\
        Doses are computed from built-in drug rules, adjusted for renal impairment\n\
        and age, and checked against each drug's safety range.\n\n\
        EXAMPLES:\n\
        \n  dosel run CALCULATE DOSE FOR drug=metformin, condition=diabetes, weight=70kg\n\
        \n  dosel run --json VALIDATE PRESCRIPTION drug=amlodipine, dose=10mg\n\
        \n  dosel report p-001                      Show a patient's recorded doses\n\
        \n  dosel drugs                             List supported drugs\n\
        \n  dosel repl                              Start an interactive session"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ./dosel.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// JSON file where patient regimens are recorded
    #[arg(long = "regimen-file", value_name = "FILE", global = true)]
    regimen_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a single command
    #[command(
        about = "Run a single dosel command",
        long_about = "Runs one command and prints the response.\n\n\
            The command words may be given unquoted; they are joined with spaces."
    )]
    Run(RunArgs),

    /// Start an interactive Read-Eval-Print Loop
    #[command(
        about = "Start an interactive REPL session",
        long_about = "Start an interactive session that runs one command per line.\n\n\
            Commands:\n\
            \n  :help   Show available REPL commands\n\
            \n  :drugs  List supported drugs\n\
            \n  :quit   Exit the REPL (also :q, :exit)"
    )]
    Repl,

    /// List supported drugs
    #[command(about = "List supported drugs with safety ranges and suggested conditions")]
    Drugs {
        #[arg(long)]
        json: bool,
    },

    /// Show a patient's regimen
    #[command(about = "Show the recorded regimen of a patient")]
    Report {
        #[arg(value_name = "PATIENT_ID")]
        patient_id: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args, Clone)]
struct RunArgs {
    /// Command text, e.g. CHECK INTERACTION BETWEEN losartan AND ibuprofen
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,

    /// Fail when a computed dose carries a safety alert
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Serialize)]
struct JsonError {
    error: dosel::ErrorReport,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Exit status for a failed command: storage trouble is an I/O failure,
/// everything else an interpreter error.
fn exit_code_for(err: &InterpreterError) -> i32 {
    match err {
        InterpreterError::Execution(ExecutionError::Persistence(_)) => 2,
        _ => 1,
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            2
        }
    }
}

/// Prints the outcome of one command and returns the exit status
fn report_outcome<S: RegimenStore>(
    interp: &Interpreter<'_, S>,
    source: &str,
    outcome: Result<Response, InterpreterError>,
    format: OutputFormat,
) -> i32 {
    match (outcome, format) {
        (Ok(response), OutputFormat::Json) => print_json(&response),
        (Ok(response), OutputFormat::Text) => {
            println!("{}", render_response(&response));
            0
        }
        (Err(err), OutputFormat::Json) => {
            let rc = print_json(&JsonError {
                error: err.report(),
            });
            if rc == 0 {
                exit_code_for(&err)
            } else {
                rc
            }
        }
        (Err(err), OutputFormat::Text) => {
            eprintln!("{}", render_error(&err, source, interp.registry()));
            exit_code_for(&err)
        }
    }
}

struct ReplSession<S> {
    interpreter: Interpreter<'static, S>,
    strict: bool,
}

impl<S: RegimenStore> ReplSession<S> {
    fn new(store: S, strict: bool) -> Self {
        Self {
            interpreter: Interpreter::new(store),
            strict,
        }
    }

    fn prompt(&self) -> &'static str {
        "dosel> "
    }

    fn handle_command(&mut self, line: &str) -> (Vec<String>, bool) {
        match line {
            ":help" => (
                vec![
                    "commands: :help, :drugs, :quit".to_string(),
                    "statements: CALCULATE DOSE FOR ..., ADJUST DOSE FOR ..., \
                     CHECK INTERACTION BETWEEN a AND b, VALIDATE PRESCRIPTION ..., \
                     REPORT REGIMEN patient_id=..., ALERT WHEN DOSE EXCEEDS SAFETY_LIMIT"
                        .to_string(),
                ],
                false,
            ),
            ":drugs" => (
                render_drug_table(self.interpreter.registry())
                    .lines()
                    .map(str::to_string)
                    .collect(),
                false,
            ),
            ":q" | ":quit" | ":exit" => (Vec::new(), true),
            _ => (vec![format!("error: unknown command '{line}'")], false),
        }
    }

    /// Output lines for one input line, and whether the session should end
    fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        if trimmed.starts_with(':') {
            return self.handle_command(trimmed);
        }
        let out = match self.interpreter.run_with(trimmed, self.strict) {
            Ok(response) => render_response(&response),
            Err(err) => render_error(&err, trimmed, self.interpreter.registry()),
        };
        (out.lines().map(str::to_string).collect(), false)
    }
}

fn run_repl<S: RegimenStore>(store: S, strict: bool) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new(store, strict);
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

/// The REPORT command for a patient id given on the command line; it goes
/// through the scanner so ids are normalized like in any other command.
fn report_command(patient_id: &str) -> String {
    format!("REPORT REGIMEN patient_id={patient_id}")
}

fn run_report<S: RegimenStore>(store: S, patient_id: &str, format: OutputFormat) -> i32 {
    let interp = Interpreter::new(store);
    let source = report_command(patient_id);
    let outcome = interp.run(&source);
    report_outcome(&interp, &source, outcome, format)
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    config.apply_env().map_err(|e| e.to_string())?;
    if let Some(path) = &cli.regimen_file {
        config.regimen_file = path.clone();
    }
    Ok(config)
}

fn output_format(json_flag: bool, config: &Config) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else {
        config.output
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    debug!("regimen file: {}", config.regimen_file.display());
    let store = JsonFileStore::new(&config.regimen_file);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Run(args) => {
            let source = args.command.join(" ");
            let interp = Interpreter::new(store);
            let outcome = interp.run_with(&source, args.strict || config.strict_alerts);
            report_outcome(&interp, &source, outcome, output_format(args.json, &config))
        }
        Command::Repl => run_repl(store, config.strict_alerts),
        Command::Drugs { json } => {
            let registry: &RuleRegistry = &BUILTIN_RULES;
            match output_format(json, &config) {
                OutputFormat::Json => print_json(&drug_summaries(registry)),
                OutputFormat::Text => {
                    println!("{}", render_drug_table(registry));
                    0
                }
            }
        }
        Command::Report { patient_id, json } => {
            run_report(store, &patient_id, output_format(json, &config))
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}
