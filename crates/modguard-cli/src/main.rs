//! CLI entry point for modguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `modguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use modguard_app::{
    format_explanation, format_not_found, parse_report_json, render_annotations,
    render_checkstyle, render_markdown, render_text, run_check, run_explain,
    runtime_error_report, serialize_report, to_renderable, verdict_exit_code, CheckInput,
    ExplainOutput,
};
use modguard_settings::{ConfigFormat, CONFIG_FILE_NAMES};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "modguard",
    version,
    about = "Allow and block list linter for Go module dependencies"
)]
struct Cli {
    /// Directory containing go.mod; targets are resolved against it.
    #[arg(long, default_value = ".")]
    work_dir: Utf8PathBuf,

    /// Config file (.toml, .yaml or .yml). Searched in the work dir, then home, when omitted.
    #[arg(long, short = 'c', global = true)]
    config: Option<Utf8PathBuf>,

    /// Debug logging.
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Checkstyle,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lint Go files for imports of blocked modules.
    Check {
        /// Files, directories or `dir/...` patterns (default `./...`).
        targets: Vec<String>,

        /// Skip `_test.go` files.
        #[arg(long = "no-test", short = 'n')]
        no_test: bool,

        /// Report format.
        #[arg(long, short = 'r', value_enum, default_value = "text")]
        report: ReportFormat,

        /// Write the report to this file instead of stdout.
        #[arg(long, short = 'f')]
        report_out: Option<Utf8PathBuf>,

        /// Exit code when issues are found.
        #[arg(long, short = 'i', default_value = "2")]
        issues_exit_code: i32,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g. "modules.blocked") or code (e.g. "blocked_version").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.cmd {
        Commands::Check {
            ref targets,
            no_test,
            report,
            ref report_out,
            issues_exit_code,
        } => cmd_check(
            &cli,
            targets,
            no_test,
            report,
            report_out.as_deref(),
            issues_exit_code,
        ),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_check(
    cli: &Cli,
    targets: &[String],
    no_test: bool,
    format: ReportFormat,
    report_out: Option<&Utf8Path>,
    issues_exit_code: i32,
) -> anyhow::Result<()> {
    let work_dir = cli
        .work_dir
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.work_dir.clone());

    let result = (|| -> anyhow::Result<i32> {
        if !work_dir.is_dir() {
            anyhow::bail!("work dir does not exist: {work_dir}");
        }

        let cfg_path = find_config(&work_dir, cli.config.as_deref())?;
        debug!(path = %cfg_path, "using config");
        let cfg_text = std::fs::read_to_string(&cfg_path)
            .with_context(|| format!("read config: {cfg_path}"))?;

        let output = run_check(CheckInput {
            work_dir: &work_dir,
            config_text: &cfg_text,
            config_format: ConfigFormat::from_path(cfg_path.as_str()),
            targets,
            skip_tests: no_test,
        })?;

        match format {
            ReportFormat::Text => {
                let text = text_report(&output.report);
                emit(report_out, text.as_bytes()).context("write text report")?;
            }
            ReportFormat::Checkstyle => {
                let xml = render_checkstyle(&to_renderable(&output.report));
                emit(report_out, xml.as_bytes()).context("write checkstyle report")?;
                // The file gets the XML; the terminal still gets the issue lines.
                if report_out.is_some() {
                    let text = text_report(&output.report);
                    emit(None, text.as_bytes()).context("write text report")?;
                }
            }
            ReportFormat::Json => {
                let data = serialize_report(&output.report)?;
                emit(report_out, &data).context("write report json")?;
            }
        }

        Ok(verdict_exit_code(output.report.verdict, issues_exit_code))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if format == ReportFormat::Json {
                let report = runtime_error_report(&format!("{err:#}"));
                if let Ok(data) = serialize_report(&report) {
                    let _ = emit(report_out, &data);
                }
            }
            eprintln!("modguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn text_report(report: &modguard_app::ModguardReport) -> String {
    let mut text = render_text(&to_renderable(report)).join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

/// `--config` if given (relative to the invocation directory), else the first known config
/// name in `work_dir`, then in the home dir.
fn find_config(work_dir: &Utf8Path, explicit: Option<&Utf8Path>) -> anyhow::Result<Utf8PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let mut search_dirs = vec![work_dir.to_path_buf()];
    if let Some(home) = dirs::home_dir().and_then(|h| Utf8PathBuf::from_path_buf(h).ok()) {
        search_dirs.push(home);
    }

    search_dirs
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
        .with_context(|| {
            format!(
                "no config file found: looked for {} in {}",
                CONFIG_FILE_NAMES.join(", "),
                search_dirs
                    .iter()
                    .map(|d| d.as_str())
                    .collect::<Vec<_>>()
                    .join(" and ")
            )
        })
}

/// Write to `path`, or stdout when no path is given.
fn emit(path: Option<&Utf8Path>, data: &[u8]) -> anyhow::Result<()> {
    use std::io::Write;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create directory: {parent}"))?;
            }
            std::fs::write(path, data).with_context(|| format!("write: {path}"))
        }
        None => std::io::stdout().write_all(data).context("write stdout"),
    }
}

fn read_report(path: &Utf8Path) -> anyhow::Result<modguard_app::ModguardReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));
    match output {
        Some(out_path) => emit(Some(&out_path), md.as_bytes()).context("write markdown output"),
        None => {
            print!("{md}");
            Ok(())
        }
    }
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
