//! matcha CLI — driving adapter for the matcha expression engine.
//!
//! Subcommands:
//! - `describe <number>...` — describe numbers with a built-in expression
//! - `eval <table> <value> [--trace]` — evaluate a rule table against a value
//! - `check <table>` — validate a rule table loads without errors

use std::fmt;
use std::process;

use matcha::{matchers, when, TableConfig};
use serde_json::Value;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "describe" => cmd_describe(&args[2..]),
        "eval" => cmd_eval(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_describe(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("describe requires at least one number".into());
    }

    let numbers = args
        .iter()
        .map(|arg| Number::parse(arg))
        .collect::<Result<Vec<_>, _>>()?;

    for number in numbers {
        println!("{}", describe_number(number));
    }

    Ok(())
}

fn cmd_eval(args: &[String]) -> Result<(), String> {
    let (table_path, raw_value, with_trace) = match args {
        [table, value] => (table, value, false),
        [table, value, flag] if flag == "--trace" => (table, value, true),
        [_, _, flag] => return Err(format!("unexpected argument \"{flag}\"")),
        _ => return Err("eval requires a table file path and a value".into()),
    };

    let table = load_table(table_path)?;
    let value = parse_value(raw_value)?;

    if with_trace {
        let trace = table
            .evaluate_with_trace(value)
            .map_err(|e| format!("table load failed: {e}"))?;
        for step in &trace.steps {
            println!("  {step}");
        }
        match (trace.result, &table.otherwise) {
            (Some(result), _) => println!("{}", render(&result)),
            (None, Some(fallback)) => println!("{} (fallback)", render(fallback)),
            (None, None) => println!("(no match)"),
        }
        return Ok(());
    }

    let result = table
        .evaluate(value)
        .map_err(|e| format!("table load failed: {e}"))?;
    match result {
        Some(result) => println!("{}", render(&result)),
        None => println!("(no match)"),
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let table_path = match args {
        [table] => table,
        [_, extra, ..] => return Err(format!("unexpected argument \"{extra}\"")),
        [] => return Err("check requires a table file path".into()),
    };

    let table = load_table(table_path)?;
    table
        .validate()
        .map_err(|e| format!("table invalid: {e}"))?;

    println!("Table valid ({} rules)", table.rules.len());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Number describer
// ═══════════════════════════════════════════════════════════════════════════════

/// A number as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn parse(raw: &str) -> Result<Self, String> {
        if let Ok(i) = raw.parse::<i64>() {
            return Ok(Self::Int(i));
        }
        raw.parse::<f64>()
            .map(Self::Float)
            .map_err(|_| format!("\"{raw}\" is not a number"))
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(_) => None,
        }
    }

    #[allow(clippy::cast_possible_truncation)] // Truncation toward zero is the intent
    fn as_int(&self) -> i64 {
        match self {
            Self::Int(i) => *i,
            Self::Float(f) => *f as i64,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

fn describe_number(number: Number) -> String {
    when(number)
        .matched_to::<String>()
        .narrows(matchers::narrow(Number::as_float), |f| {
            format!("{} is a double.", Number::Float(f))
        })
        .matches(|n| (n.as_int() & 1) != 0)
        .then_map(|n| format!("{n} is odd."))
        .matches_value(Number::Int(42))
        .then("42 is an interesting number.".into())
        .otherwise_map(|n| format!("I don't have much to say about {n}."))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_table(path: &str) -> Result<TableConfig<Value, Value>, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

/// Parse a command-line value as a YAML scalar or flow collection.
///
/// `42` is a number, `abc` a string, `[1, 2]` a list.
fn parse_value(raw: &str) -> Result<Value, String> {
    serde_yaml::from_str(raw).map_err(|e| format!("invalid value \"{raw}\": {e}"))
}

/// Strings print bare; everything else prints as JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print_usage() {
    eprintln!(
        "Usage: matcha <command> [options]

Commands:
  describe <number>...              Describe numbers with the built-in expression
  eval <table> <value> [--trace]    Evaluate a rule table against a value
  check <table>                     Validate a rule table
  help                              Show this help"
    );
}
