use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use markscan_core::error::DetectionFailure;
use markscan_core::filters::ThresholdMethod;
use markscan_core::grid::BlankRowPolicy;
use markscan_core::io::{FileSink, FileStore, ImageFileSource};
use markscan_core::pipeline::{
    run_session, GradedSheet, GradingConfig, LoopControl, Pipeline, PipelineStage,
    ProgressReporter,
};
use serde::Serialize;
use tracing::debug;

use crate::summary::{print_grade_summary, print_run_header};

#[derive(Clone, ValueEnum)]
pub enum BlankRowArg {
    Unanswered,
    FirstChoice,
}

#[derive(Args)]
pub struct GradeArgs {
    /// Photo of the answer sheet
    pub image: PathBuf,

    /// Grading config file (TOML); flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of questions on the sheet
    #[arg(long)]
    pub questions: Option<usize>,

    /// Number of choices per question
    #[arg(long)]
    pub choices: Option<usize>,

    /// Comma-separated answer key, 0-based choice per question
    #[arg(long)]
    pub answers: Option<String>,

    /// How to report a question with no mark
    #[arg(long, value_enum)]
    pub blank_rows: Option<BlankRowArg>,

    /// Fraction of a cell that must be inked for its row to count as marked
    #[arg(long)]
    pub min_fill: Option<f32>,

    /// Pick the bubble threshold with Otsu's method instead of the fixed level
    #[arg(long)]
    pub otsu: bool,

    /// Annotated result image
    #[arg(short, long, default_value = "result.png")]
    pub output: PathBuf,

    /// Also write the eight-panel diagnostics montage here
    #[arg(long)]
    pub montage: Option<PathBuf>,

    /// Print the result as JSON instead of a styled summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    image: &'a Path,
    output: Option<&'a Path>,
    score: f64,
    correct: usize,
    questions: usize,
    responses: &'a [Option<usize>],
    correctness: &'a [bool],
}

/// Drives a spinner from pipeline stage events.
struct SpinnerReporter {
    bar: ProgressBar,
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.bar.set_message(stage.to_string());
    }

    fn finish_stage(&self) {
        self.bar.tick();
    }
}

pub fn run(args: &GradeArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => GradingConfig::default(),
    };
    apply_overrides(&mut config, args)?;

    let pipeline = Pipeline::new(config).context("Invalid grading configuration")?;
    let config = pipeline.config();

    if !args.json {
        print_run_header(config, &args.image, &args.output, args.montage.as_deref());
    }

    let bar = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    bar.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg}")?);
    bar.enable_steady_tick(Duration::from_millis(80));
    let reporter = SpinnerReporter { bar };

    let mut source = ImageFileSource::new(&args.image, config.frame_size);
    let mut sink = FileSink::new(args.montage.clone(), config.montage_scale);
    let mut store = FileStore::new(&args.output);

    let mut outcome: Option<std::result::Result<GradedSheet, DetectionFailure>> = None;
    let session = run_session(
        &pipeline,
        &mut source,
        &mut sink,
        &mut store,
        &reporter,
        |report| {
            outcome = Some(report.outcome.clone());
            if report.is_graded() {
                LoopControl::SaveAndStop
            } else {
                LoopControl::Stop
            }
        },
    )
    .with_context(|| format!("Failed to grade {}", args.image.display()))?;
    reporter.bar.finish_and_clear();

    let sheet = match outcome {
        Some(Ok(sheet)) => sheet,
        Some(Err(failure)) => bail!("No answer sheet found in {}: {failure}", args.image.display()),
        None => bail!("No frame was read from {}", args.image.display()),
    };
    let saved = session.saved.first().map(PathBuf::as_path);

    if args.json {
        let report = JsonReport {
            image: &args.image,
            output: saved,
            score: sheet.grade.score,
            correct: sheet.grade.correct,
            questions: sheet.grade.questions(),
            responses: &sheet.responses,
            correctness: &sheet.grade.correctness,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_grade_summary(&sheet, pipeline.answer_key().answers(), saved);
    }

    Ok(())
}

pub fn load_config(path: &Path) -> Result<GradingConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&contents).context("Invalid grading config")?;
    debug!(path = %path.display(), "Grading config loaded");
    Ok(config)
}

fn apply_overrides(config: &mut GradingConfig, args: &GradeArgs) -> Result<()> {
    if let Some(questions) = args.questions {
        config.questions = questions;
    }
    if let Some(choices) = args.choices {
        config.choices = choices;
    }
    if let Some(ref answers) = args.answers {
        config.answer_key = parse_answer_key(answers)?;
    }
    if let Some(ref policy) = args.blank_rows {
        config.blank_rows.policy = match policy {
            BlankRowArg::Unanswered => BlankRowPolicy::Unanswered,
            BlankRowArg::FirstChoice => BlankRowPolicy::FirstChoice,
        };
    }
    if let Some(fill) = args.min_fill {
        config.blank_rows.min_fill = fill;
    }
    if args.otsu {
        config.binarize = ThresholdMethod::Otsu;
    }
    Ok(())
}

fn parse_answer_key(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(|s| {
            let s = s.trim();
            s.parse::<usize>()
                .with_context(|| format!("Invalid answer '{s}' in --answers"))
        })
        .collect()
}
