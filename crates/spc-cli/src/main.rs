// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use serde::Serialize;
use spc_cli::{parse_sample_json, run_detect};
use spc_core::{SampleView, SpcError};
use spc_rules::{PatternReport, Rule, classify_zones};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

struct Cli {
    command: Command,
}

enum Command {
    Detect(DetectArgs),
    Zones(InputArgs),
    Describe(InputArgs),
    Rules,
}

#[derive(Debug, Default)]
struct DetectArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    collapse: bool,
}

#[derive(Debug, Default)]
struct InputArgs {
    input: PathBuf,
    output: Option<PathBuf>,
}

struct CliError {
    code: String,
    message: String,
}

impl CliError {
    fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: "invalid_input".to_string(),
            message: message.into(),
        }
    }

    fn io(message: impl Into<String>) -> Self {
        Self {
            code: "io".to_string(),
            message: message.into(),
        }
    }
}

impl From<SpcError> for CliError {
    fn from(err: SpcError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct DetectOutput {
    command: &'static str,
    collapse: bool,
    report: PatternReport,
}

#[derive(Serialize)]
struct ZonesOutput {
    command: &'static str,
    mean: f64,
    std_dev: f64,
    median: f64,
    degenerate: bool,
    boundaries: Vec<ZoneBoundaryOutput>,
    labels: Vec<&'static str>,
}

#[derive(Serialize)]
struct ZoneBoundaryOutput {
    zone: &'static str,
    lower: f64,
    upper: f64,
    theoretical_probability: f64,
}

#[derive(Serialize)]
struct DescribeOutput {
    command: &'static str,
    summary: spc_rules::SampleSummary,
}

#[derive(Serialize)]
struct RulesOutput {
    command: &'static str,
    rules: Vec<RuleOutput>,
}

#[derive(Serialize)]
struct RuleOutput {
    name: &'static str,
    window_len: usize,
    description: &'static str,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Serialize)]
struct ErrorPayload {
    code: String,
    message: String,
}

fn main() {
    if let Err(err) = run() {
        emit_structured_error(&err);
        process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let Some(cli) = parse_cli_from_env()? else {
        return Ok(());
    };

    match cli.command {
        Command::Detect(args) => handle_detect(args),
        Command::Zones(args) => handle_zones(args),
        Command::Describe(args) => handle_describe(args),
        Command::Rules => handle_rules(),
    }
}

fn parse_cli_from_env() -> Result<Option<Cli>, CliError> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        print_root_help();
        return Ok(None);
    }

    if matches!(args[0].as_str(), "-h" | "--help") {
        print_root_help();
        return Ok(None);
    }
    if matches!(args[0].as_str(), "-V" | "--version") {
        print_version();
        return Ok(None);
    }

    let command_name = args[0].as_str();
    let rest = &args[1..];

    if rest
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print_command_help(command_name)?;
        return Ok(None);
    }

    let command = match command_name {
        "detect" => Command::Detect(parse_detect_args(rest)?),
        "zones" => Command::Zones(parse_input_args("zones", rest)?),
        "describe" => Command::Describe(parse_input_args("describe", rest)?),
        "rules" => {
            if let Some(extra) = rest.first() {
                return Err(CliError::invalid_input(format!(
                    "rules takes no arguments; got '{extra}'"
                )));
            }
            Command::Rules
        }
        _ => {
            return Err(CliError::invalid_input(format!(
                "unknown command '{command_name}'; expected one of: detect, zones, describe, rules"
            )));
        }
    };

    Ok(Some(Cli { command }))
}

fn parse_detect_args(tokens: &[String]) -> Result<DetectArgs, CliError> {
    let mut args = DetectArgs::default();
    let mut input = None;
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "--input" => input = Some(expect_path("--input", iter.next())?),
            "--output" => args.output = Some(expect_path("--output", iter.next())?),
            "--collapse" => args.collapse = true,
            other => {
                return Err(CliError::invalid_input(format!(
                    "unknown detect flag '{other}'"
                )));
            }
        }
    }
    args.input = input.ok_or_else(|| CliError::invalid_input("detect requires --input <path>"))?;
    Ok(args)
}

fn parse_input_args(command: &str, tokens: &[String]) -> Result<InputArgs, CliError> {
    let mut args = InputArgs::default();
    let mut input = None;
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "--input" => input = Some(expect_path("--input", iter.next())?),
            "--output" => args.output = Some(expect_path("--output", iter.next())?),
            other => {
                return Err(CliError::invalid_input(format!(
                    "unknown {command} flag '{other}'"
                )));
            }
        }
    }
    args.input =
        input.ok_or_else(|| CliError::invalid_input(format!("{command} requires --input <path>")))?;
    Ok(args)
}

fn expect_path(flag: &str, token: Option<&String>) -> Result<PathBuf, CliError> {
    token
        .map(PathBuf::from)
        .ok_or_else(|| CliError::invalid_input(format!("{flag} requires a path argument")))
}

fn read_sample(path: &Path) -> Result<Vec<f64>, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|err| CliError::io(format!("cannot read {}: {err}", path.display())))?;
    Ok(parse_sample_json(&text)?)
}

fn write_json<T: Serialize>(payload: &T, output: Option<&Path>) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(payload)
        .map_err(|err| CliError::io(format!("cannot serialize output: {err}")))?;
    match output {
        Some(path) => fs::write(path, json.as_bytes())
            .map_err(|err| CliError::io(format!("cannot write {}: {err}", path.display()))),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn handle_detect(args: DetectArgs) -> Result<(), CliError> {
    let values = read_sample(&args.input)?;
    let report = run_detect(&values, args.collapse)?;
    write_json(
        &DetectOutput {
            command: "detect",
            collapse: args.collapse,
            report,
        },
        args.output.as_deref(),
    )
}

fn handle_zones(args: InputArgs) -> Result<(), CliError> {
    let values = read_sample(&args.input)?;
    let view = SampleView::new(&values)?;
    let classification = classify_zones(&view);

    let zone_names = ["C", "B", "A"];
    let probabilities = [
        spc_core::ZONE_C_PROBABILITY,
        spc_core::ZONE_B_PROBABILITY,
        spc_core::ZONE_A_PROBABILITY,
    ];
    let boundaries = classification
        .boundaries
        .iter()
        .zip(zone_names)
        .zip(probabilities)
        .map(|((boundary, zone), theoretical_probability)| ZoneBoundaryOutput {
            zone,
            lower: boundary.lower,
            upper: boundary.upper,
            theoretical_probability,
        })
        .collect();

    write_json(
        &ZonesOutput {
            command: "zones",
            mean: classification.mean,
            std_dev: classification.std_dev,
            median: classification.median,
            degenerate: classification.degenerate,
            boundaries,
            labels: classification.labels.iter().map(|z| z.as_str()).collect(),
        },
        args.output.as_deref(),
    )
}

fn handle_describe(args: InputArgs) -> Result<(), CliError> {
    let values = read_sample(&args.input)?;
    let report = run_detect(&values, false)?;
    write_json(
        &DescribeOutput {
            command: "describe",
            summary: report.summary,
        },
        args.output.as_deref(),
    )
}

fn handle_rules() -> Result<(), CliError> {
    let rules = Rule::ALL
        .iter()
        .map(|rule| RuleOutput {
            name: rule.name(),
            window_len: rule.window_len(),
            description: rule.description(),
        })
        .collect();
    write_json(
        &RulesOutput {
            command: "rules",
            rules,
        },
        None,
    )
}

fn emit_structured_error(err: &CliError) {
    let envelope = ErrorEnvelope {
        error: ErrorPayload {
            code: err.code.clone(),
            message: err.message.clone(),
        },
    };
    match serde_json::to_string(&envelope) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("error ({}): {}", err.code, err.message),
    }
}

fn print_version() {
    println!("spc {}", env!("CARGO_PKG_VERSION"));
}

fn print_root_help() {
    println!(
        "spc - control-chart zone and pattern-rule engine\n\n\
         USAGE:\n  spc <COMMAND> [FLAGS]\n\n\
         COMMANDS:\n\
         \x20 detect    scan a sample with the eight pattern rules\n\
         \x20 zones     classify a sample into sigma zones\n\
         \x20 describe  summary statistics for a sample\n\
         \x20 rules     list the rule table\n\n\
         Run 'spc <COMMAND> --help' for command flags."
    );
}

fn print_command_help(command: &str) -> Result<(), CliError> {
    match command {
        "detect" => {
            println!(
                "spc detect --input <path> [--collapse] [--output <path>]\n\n\
                 Reads a JSON array of numbers (numeric strings are coerced),\n\
                 scans it with the eight pattern rules, and prints the report.\n\
                 --collapse merges overlapping runs into contiguous ranges."
            );
        }
        "zones" => {
            println!(
                "spc zones --input <path> [--output <path>]\n\n\
                 Prints mean, standard deviation, zone boundaries, and the\n\
                 per-point zone labels."
            );
        }
        "describe" => {
            println!(
                "spc describe --input <path> [--output <path>]\n\n\
                 Prints descriptive and normality statistics for the sample."
            );
        }
        "rules" => {
            println!("spc rules\n\nPrints the rule table: name, window length, description.");
        }
        _ => {
            return Err(CliError::invalid_input(format!(
                "unknown command '{command}'; expected one of: detect, zones, describe, rules"
            )));
        }
    }
    Ok(())
}
