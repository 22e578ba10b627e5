use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use termwaste_core::config::Config;
use termwaste_core::quiz::{self, QuizResult};
use termwaste_core::report::Report;
use termwaste_core::types::{Direction, Priority};
use termwaste_core::{analyze_file, AnalyzeOptions};

#[derive(Parser, Debug)]
#[command(
    name = "termwaste",
    version,
    about = "Search term waste and opportunity estimator (estimated, not audited)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an uploaded search-term report.
    Analyze {
        #[arg(long)]
        input: PathBuf,

        #[arg(long, default_value = "termwaste-out")]
        out: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value = "all")]
        output_format: OutputFormat,
    },
    /// Score a six-question account health questionnaire.
    Quiz {
        #[arg(long)]
        answers: PathBuf,

        #[arg(long, default_value = "termwaste-out")]
        out: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value = "all")]
        output_format: OutputFormat,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
    All,
}

struct Style {
    bold: &'static str,
    dim: &'static str,
    red: &'static str,
    green: &'static str,
    yellow: &'static str,
    orange: &'static str,
    reset: &'static str,
}

const COLOR: Style = Style {
    bold: "\x1b[1m",
    dim: "\x1b[2m",
    red: "\x1b[31m",
    green: "\x1b[32m",
    yellow: "\x1b[33m",
    orange: "\x1b[38;5;208m",
    reset: "\x1b[0m",
};

const PLAIN: Style = Style {
    bold: "",
    dim: "",
    red: "",
    green: "",
    yellow: "",
    orange: "",
    reset: "",
};

fn style() -> &'static Style {
    if std::env::var_os("NO_COLOR").is_some() {
        &PLAIN
    } else {
        &COLOR
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let res = match cli.cmd {
        Commands::Analyze {
            input,
            out,
            config,
            output_format,
        } => {
            let cfg = load_config(config.as_deref());
            run_analyze(&input, &out, &cfg, &output_format)
        }
        Commands::Quiz {
            answers,
            out,
            config,
            output_format,
        } => {
            let cfg = load_config(config.as_deref());
            run_quiz(&answers, &out, &cfg, &output_format)
        }
    };

    match res {
        Ok(code) => code,
        Err(e) => {
            let s = style();
            eprintln!(
                "{}{red}error:{reset} {:#}",
                s.bold,
                e,
                red = s.red,
                reset = s.reset
            );
            std::process::ExitCode::from(1)
        }
    }
}

fn print_banner() {
    let s = style();
    eprintln!(
        "\n  {bold}term{reset}{orange}|{reset}{dim}waste{reset}  {dim}search term waste estimator{reset}\n",
        bold = s.bold,
        orange = s.orange,
        dim = s.dim,
        reset = s.reset,
    );
}

fn score_color(score: u8) -> &'static str {
    let s = style();
    if score >= 90 {
        s.green
    } else if score >= 75 {
        s.yellow
    } else if score >= 60 {
        s.orange
    } else {
        s.red
    }
}

fn priority_color(priority: &Priority) -> &'static str {
    let s = style();
    match priority {
        Priority::High => s.red,
        Priority::Medium => s.yellow,
    }
}

fn dollars(amount: f64) -> String {
    let whole = amount.round().max(0.0) as u64;
    let digits = whole.to_string();
    let bytes = digits.as_bytes();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    result.push('$');
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(p) => Config::load(p).unwrap_or_else(|e| {
            eprintln!(
                "{}{}warning:{} failed to load config {}: {}",
                style().bold,
                style().yellow,
                style().reset,
                p.display(),
                e
            );
            Config::default()
        }),
        None => Config::discover().unwrap_or_default(),
    }
}

fn write_artifacts(
    out: &Path,
    stem: &str,
    json: &[u8],
    markdown: &str,
    output_format: &OutputFormat,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out).with_context(|| format!("create out dir {}", out.display()))?;

    let mut written = Vec::new();
    if matches!(output_format, OutputFormat::Json | OutputFormat::All) {
        let path = out.join(format!("{stem}.json"));
        std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    if matches!(output_format, OutputFormat::Markdown | OutputFormat::All) {
        let path = out.join(format!("{stem}.md"));
        std::fs::write(&path, markdown).with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn print_report(report: &Report, written: &[PathBuf]) {
    let s = style();
    let sc = score_color(report.score);

    eprintln!(
        "  {dim}health_score        {reset}{sc}{bold}{}{reset} / 100",
        report.score,
        dim = s.dim,
        sc = sc,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}monthly_opportunity {reset}{bold}{}{reset}",
        dollars(report.monthly_opportunity),
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}monthly_spend       {reset}{bold}{}{reset}",
        dollars(report.totals.monthly_spend),
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}window              {reset}{bold}{}{reset}",
        report.data_quality.period_label,
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );

    if !report.issues.is_empty() {
        eprintln!();
        for issue in &report.issues {
            let pc = priority_color(&issue.priority);
            let tag = match issue.direction {
                Direction::Waste => "waste",
                Direction::Gain => "gain",
            };
            eprintln!(
                "  {pc}{:?}{reset}  {} {dim}({}/month {tag}){reset}",
                issue.priority,
                issue.title,
                dollars(issue.monthly_amount),
                pc = pc,
                dim = s.dim,
                tag = tag,
                reset = s.reset
            );
        }
    }

    eprintln!();
    for path in written {
        eprintln!(
            "  {dim}\u{2192} {}{reset}",
            path.display(),
            dim = s.dim,
            reset = s.reset
        );
    }
    eprintln!();
}

fn run_analyze(
    input: &Path,
    out: &Path,
    cfg: &Config,
    output_format: &OutputFormat,
) -> anyhow::Result<std::process::ExitCode> {
    print_banner();

    let opts = AnalyzeOptions {
        thresholds: cfg.thresholds.clone(),
    };
    let report = analyze_file(input, &opts)
        .with_context(|| format!("analyze {}", input.display()))?;

    let json = serde_json::to_vec_pretty(&report).context("serialize report json")?;
    let written = write_artifacts(out, "report", &json, &report.to_markdown(), output_format)?;

    // Machine-parseable line on stdout; human-readable output on stderr.
    println!(
        "score={} monthly_opportunity={:.0} monthly_spend={:.0}",
        report.score, report.monthly_opportunity, report.totals.monthly_spend
    );
    print_report(&report, &written);

    Ok(std::process::ExitCode::from(0))
}

fn print_quiz(result: &QuizResult, written: &[PathBuf]) {
    let s = style();
    let sc = score_color(result.score);

    eprintln!(
        "  {dim}health_score        {reset}{sc}{bold}{}{reset} / 100",
        result.score,
        dim = s.dim,
        sc = sc,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}monthly_opportunity {reset}{bold}{}{reset} {dim}({} to {}){reset}",
        dollars(result.total),
        dollars(result.low),
        dollars(result.high),
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );

    if !result.breakdown.is_empty() {
        eprintln!();
        for component in &result.breakdown {
            let tag = match component.direction {
                Direction::Waste => "waste",
                Direction::Gain => "gain",
            };
            eprintln!(
                "  {}  {dim}{}/month {tag}{reset}",
                component.title,
                dollars(component.monthly_amount),
                dim = s.dim,
                tag = tag,
                reset = s.reset
            );
        }
    }

    eprintln!();
    for path in written {
        eprintln!(
            "  {dim}\u{2192} {}{reset}",
            path.display(),
            dim = s.dim,
            reset = s.reset
        );
    }
    eprintln!();
}

fn run_quiz(
    answers_path: &Path,
    out: &Path,
    cfg: &Config,
    output_format: &OutputFormat,
) -> anyhow::Result<std::process::ExitCode> {
    print_banner();

    let answers = quiz::load_answers(answers_path)?;
    let result = quiz::score_quiz(&answers, &cfg.catalog());

    let json = serde_json::to_vec_pretty(&result).context("serialize quiz json")?;
    let written = write_artifacts(out, "quiz", &json, &result.to_markdown(), output_format)?;

    println!(
        "score={} total={:.0} low={:.0} high={:.0}",
        result.score, result.total, result.low, result.high
    );
    print_quiz(&result, &written);

    Ok(std::process::ExitCode::from(0))
}
