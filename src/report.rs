use tamed::{Recipe, Step, Value, Variable};

/// What a piece of report text is, rather than how it looks.
#[derive(Clone, Copy)]
enum Tone {
    Title,
    Label,
    Rule,
    Step,
    Snapshot,
    Result,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Title => "1;36",
            Tone::Label => "2",
            Tone::Rule => "90",
            Tone::Step => "34",
            Tone::Snapshot => "33",
            Tone::Result => "1;32",
        }
    }
}

/// ANSI styling that collapses to plain text when colour is off.
struct Palette(bool);

impl Palette {
    fn paint(&self, s: impl AsRef<str>, tone: Tone) -> String {
        if self.0 { format!("\x1b[{}m{}\x1b[0m", tone.sgr(), s.as_ref()) } else { s.as_ref().to_string() }
    }
}

/// Everything the report needs from one CLI run.
pub struct Run<'a> {
    pub input: &'a Value,
    pub recipe: Recipe,
    pub variable: &'a Variable,
    pub resolved: &'a Value,
    /// Render values as JSON rather than the compact display form.
    pub json: bool,
}

/// Only the resolved value, one line.
pub fn print_value(run: &Run<'_>, color: bool) {
    let palette = Palette(color);
    println!("{}", palette.paint(render(run.resolved, run.json), Tone::Result));
}

pub fn print_run(run: &Run<'_>, color: bool) {
    let palette = Palette(color);
    let title = format!("⚙  Recipe: {} ({})", run.recipe, run.variable.shape());
    println!("\n{}", palette.paint(title, Tone::Title));
    println!("  {} {}", palette.paint("input:  ", Tone::Label), render(run.input, run.json));
    println!("  {} {}", palette.paint("default:", Tone::Label), render(run.variable.default_value(), run.json));

    println!("\n{}", palette.paint("━━━ Steps ━━━", Tone::Rule));
    match run.variable.trace() {
        Some(trace) if !trace.is_empty() => {
            for (idx, step) in trace.steps.iter().enumerate() {
                println!("  {}", fmt_step(idx, step, run.json, &palette));
            }
        }
        _ => println!("{}", palette.paint("  No steps recorded", Tone::Label)),
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", Tone::Rule));
    println!("  {}", palette.paint(render(run.resolved, run.json), Tone::Result));

    if let Some(trace) = run.variable.trace() {
        println!("\n{}", palette.paint("━━━ Timing ━━━", Tone::Rule));
        println!(
            "  Total: {}  │  Steps: {}",
            palette.paint(format!("{:?}", trace.total()), Tone::Result),
            palette.paint(trace.steps.len().to_string(), Tone::Step),
        );
    }
    println!();
}

fn fmt_step(idx: usize, step: &Step, json: bool, palette: &Palette) -> String {
    format!(
        "{} {} {} {}",
        palette.paint(format!("[{idx}]"), Tone::Rule),
        palette.paint(step.operation, Tone::Step),
        palette.paint(format!("{:?}", step.duration), Tone::Label),
        palette.paint(render(&step.snapshot, json), Tone::Snapshot),
    )
}

fn render(value: &Value, json: bool) -> String {
    if json { serde_json::Value::from(value).to_string() } else { value.to_string() }
}
