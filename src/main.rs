use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use floodview::{
    chart, classify, ChartJsBackend, Config, Document, Locale, ReportModel, Renderer,
};
use log::LevelFilter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "floodview")]
#[command(author, version, about = "Flood damage assessment dashboards from analysis records")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show debug logging for each render step
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a report record (JSON) into an HTML dashboard
    Render {
        /// Path to the report JSON file
        report: PathBuf,

        /// Output HTML file (default: <report_dir>/floodview_report_<timestamp>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Digit grouping locale for counts (en-IN, en-US)
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Render the bundled sample record
    Sample {
        /// Output HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Digit grouping locale for counts (en-IN, en-US)
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Validate a report record and print its derived values
    Check {
        /// Path to the report JSON file
        report: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::default()
        .filter_level(default_level)
        .parse_env(env_logger::Env::default().filter("FLOODVIEW_LOG"))
        .format_timestamp(None)
        .init();

    let config = Config::load();

    let code = match cli.command {
        Command::Render {
            report,
            output,
            locale,
        } => match ReportModel::load(&report) {
            Ok(model) => render(&model, output, locale, &config, cli.quiet),
            Err(e) => {
                eprintln!("{} {}: {}", "Error:".red().bold(), report.display(), e);
                1
            }
        },
        Command::Sample { output, locale } => match ReportModel::sample() {
            Ok(model) => render(&model, output, locale, &config, cli.quiet),
            Err(e) => {
                eprintln!("{} bundled sample: {}", "Error:".red().bold(), e);
                1
            }
        },
        Command::Check { report } => check(&report, &config),
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "floodview",
                &mut std::io::stdout(),
            );
            0
        }
    };

    std::process::exit(code);
}

/// Run one render pass and write the page. Returns the process exit code.
fn render(
    report: &ReportModel,
    output: Option<PathBuf>,
    locale: Option<Locale>,
    config: &Config,
    quiet: bool,
) -> i32 {
    let locale = locale.unwrap_or(config.format.locale);

    let mut doc = Document::dashboard();
    let mut charts = ChartJsBackend::for_document(&doc);
    let outcome = Renderer::new(report)
        .with_locale(locale)
        .with_chart_style(config.charts)
        .render(&mut doc, &mut charts);

    let output_path = output.unwrap_or_else(|| {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        config
            .output
            .report_dir
            .join(format!("floodview_report_{}.html", timestamp))
    });

    if let Err(e) = floodview::html::generate(
        &output_path,
        &doc,
        charts.charts(),
        &config.output.title,
    ) {
        eprintln!("{} failed to write dashboard: {}", "Error:".red().bold(), e);
        return 1;
    }

    if !quiet {
        if !outcome.is_complete() {
            eprintln!(
                "{} {} binding(s) skipped",
                "Partial:".red().bold(),
                outcome.failures.len()
            );
        }
        println!(
            "{} {}",
            "Dashboard saved:".green().bold(),
            output_path.display()
        );
    }

    if outcome.is_complete() {
        0
    } else {
        2
    }
}

fn check(path: &Path, config: &Config) -> i32 {
    let report = match ReportModel::load(path) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}: {}", "Error:".red().bold(), path.display(), e);
            return 1;
        }
    };

    let classification = classify(&report.severity_label);
    let composition = chart::composition_spec(&report, &config.charts);
    let impact = chart::impact_spec(&report, &config.charts);

    println!("{}", report.location.bold());
    println!(
        "  badge        {} ({})",
        classification.display_text, classification.variant
    );
    println!("  composition  {:?}", composition.values());
    println!("  impact       {:?}", impact.values());
    println!("  insights     {}", report.insights.len());
    println!("  timeline     {}", report.severity_timeline.len());

    let findings = report.validate();
    if findings.is_empty() {
        println!("{}", "Valid".green().bold());
        0
    } else {
        for finding in &findings {
            println!("{} {}", "Invalid:".yellow().bold(), finding);
        }
        1
    }
}
