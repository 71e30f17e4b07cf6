mod report;

use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tamed::{Context, Error, Options, Recipe, Value, Variable};
use tracing_subscriber::EnvFilter;

/// Env var holding the log filter, e.g. `TAMED_LOG=tamed=trace`.
const LOG_ENV: &str = "TAMED_LOG";

const EXIT_CODES: &str = "Exit codes:
  0  Success.
  2  Invalid arguments, input, or recipe configuration.";

#[derive(Parser, Debug)]
#[command(name = "tamed", version, about = "Coerce loosely-typed input with a named recipe.", after_help = EXIT_CODES)]
struct Cli {
    /// Recipe to run: int, uint, float, ufloat, bool, string, text, upper, lower,
    /// id, ids, id_list, tags, price[_up|_down], cost[_up|_down], toggle, page, options.
    #[arg(short, long, default_value = "string")]
    recipe: Recipe,

    /// Declare the container array-shaped.
    #[arg(long)]
    array: bool,

    /// Default for missing or invalid input (integers and decimals are parsed as numbers).
    #[arg(short, long, value_name = "VALUE")]
    default: Option<String>,

    /// Substitute for empty string results.
    #[arg(long, value_name = "TEXT", default_value = "")]
    empty: String,

    /// Locale deciding the decimal separator. Default: LC_ALL, LC_NUMERIC, LANG.
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Do not descend into nested collections.
    #[arg(long)]
    flat: bool,

    /// Parse the single input as JSON.
    #[arg(long)]
    json: bool,

    /// Print every pipeline step with its timing.
    #[arg(long)]
    trace: bool,

    /// Force ANSI color output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,

    /// Raw input: one value, several values (a list), or `key=value` pairs (a map).
    #[arg(required = true, value_name = "INPUT")]
    input: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let raw = build_input(&cli.input, cli.json)?;
    let default = cli.default.as_deref().map_or(Value::Null, parse_default);
    let context = match &cli.locale {
        Some(locale) => Context::for_locale(locale),
        None => Context::from_env(),
    };
    let options = Options { recursive: !cli.flat, empty_substitute: cli.empty.clone(), ..Options::default() };

    let mut variable = Variable::with_default(raw.clone(), default).with_context(context).with_options(options);
    if cli.array {
        variable = variable.as_array().map_err(render)?;
    }
    if cli.trace {
        variable = variable.traced();
    }

    let variable = variable.apply_recipe(cli.recipe).map_err(render)?;
    let resolved = variable.resolve().map_err(render)?;

    let color = if cli.no_color {
        false
    } else {
        cli.color || io::stdout().is_terminal()
    };
    let run = report::Run { input: &raw, recipe: cli.recipe, variable: &variable, resolved: &resolved, json: cli.json };
    if cli.trace {
        report::print_run(&run, color);
    } else {
        report::print_value(&run, color);
    }
    Ok(())
}

fn render(err: Error) -> String {
    err.to_string()
}

/// One value stays scalar, several become a list, `key=value` pairs a map.
fn build_input(inputs: &[String], json: bool) -> Result<Value, String> {
    if json {
        let [text] = inputs else {
            return Err("--json expects exactly one input".to_string());
        };
        let parsed: serde_json::Value = serde_json::from_str(text).map_err(|err| format!("invalid JSON: {err}"))?;
        return Ok(Value::from(parsed));
    }

    if inputs.iter().all(|s| s.contains('=')) {
        return Ok(Value::map(inputs.iter().filter_map(|s| s.split_once('='))));
    }

    match inputs {
        [single] => Ok(Value::from(single.as_str())),
        many => Ok(Value::list(many.iter().map(String::as_str))),
    }
}

fn parse_default(text: &str) -> Value {
    if let Ok(i) = text.parse::<i64>() {
        return Value::Int(i);
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::from(text),
    }
}
