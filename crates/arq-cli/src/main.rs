//! `arq`: ejecuta acciones del registry de muestras desde la terminal.
//!
//!   arq list
//!   arq describe letters
//!   arq run spell_foo '{"string":"lorem ","o_count":3}'
//!
//! El contexto resultante va a stdout. Códigos de salida: 0 éxito,
//! 1 contexto fallido, 2 error de contrato/entrada, 3 configuración.
use std::process::ExitCode;

use arq_core::{Context, Registry, Resolved};
use arq_rust::config::{AppConfig, OutputFormat};
use arq_rust::errors::AppError;
use arq_rust::{logging, sample_registry};
use clap::{Parser, Subcommand};
use log::debug;

#[derive(Parser)]
#[command(name = "arq")]
#[command(about = "Run arq actions against a JSON context", long_about = None)]
struct Cli {
    /// Output format for contexts: pretty | compact (overrides ARQ_OUTPUT)
    #[arg(long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered action paths
    List,

    /// Show the contract of an action, or the children of a namespace
    Describe {
        /// Action or namespace path (e.g. `letters`, `Letters::AddF`)
        path: String,
    },

    /// Run an action and print the resulting context
    Run {
        /// Action path
        path: String,

        /// Initial context as a JSON object
        #[arg(default_value = "{}")]
        context: String,
    },
}

/// Texto para stdout y código de salida de un comando.
#[derive(Debug, PartialEq, Eq)]
struct Report {
    text: String,
    code: u8,
}

impl Report {
    fn ok(text: String) -> Self {
        Self { text, code: 0 }
    }
}

fn execute(command: &Commands, registry: &Registry, output: OutputFormat) -> Result<Report, AppError> {
    match command {
        Commands::List => Ok(Report::ok(registry.paths().collect::<Vec<_>>().join("\n"))),
        Commands::Describe { path } => describe(registry, path).map(Report::ok),
        Commands::Run { path, context } => {
            let input: serde_json::Value = serde_json::from_str(context)?;
            let mut ctx = Context::from_value(input)?;
            debug!("cli:run path={path} ctx={}", ctx.id());
            registry.call(path, &mut ctx)?;
            let text = output.render(&serde_json::to_value(&ctx)?)?;
            Ok(Report { text,
                        code: if ctx.is_failed() { 1 } else { 0 } })
        }
    }
}

fn describe(registry: &Registry, path: &str) -> Result<String, AppError> {
    let text = match registry.resolve(path)? {
        Resolved::Action(action) => {
            format!("action  {}\nparams  {}\nreturns {}\nexport  {:?}",
                    action.name(),
                    action.required_inputs().join(", "),
                    action.required_outputs().join(", "),
                    action.export_policy())
        }
        Resolved::Namespace(ns) => {
            let label = if ns.path().is_empty() { "<root>" } else { ns.path() };
            format!("namespace {label}\n{}", ns.children().join("\n"))
        }
    };
    Ok(text)
}

fn run(cli: &Cli) -> Result<Report, AppError> {
    let config = AppConfig::from_env()?;
    logging::init(&config.log_filter);
    let output = match &cli.output {
        Some(raw) => raw.parse()?,
        None => config.output,
    };
    let registry = sample_registry()?;
    execute(&cli.command, &registry, output)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) => {
            println!("{}", report.text);
            ExitCode::from(report.code)
        }
        Err(e) => {
            eprintln!("[arq] {e}");
            ExitCode::from(if e.is_input_error() { 2 } else { 3 })
        }
    }
}
