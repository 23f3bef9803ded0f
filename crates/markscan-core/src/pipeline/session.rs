use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::grid::GradeResult;
use crate::io::source::{FrameSink, FrameSource, ResultStore};

use super::orchestrator::Pipeline;
use super::types::{FrameReport, ProgressReporter};

/// What the caller wants after seeing a frame's report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// Persist this frame's composite, then continue.
    Save,
    Stop,
    SaveAndStop,
}

#[derive(Clone, Debug, Default)]
pub struct SessionSummary {
    pub frames: usize,
    pub graded: usize,
    pub saved: Vec<PathBuf>,
    pub last_grade: Option<GradeResult>,
}

/// Pull frames from `source` until `control` says stop.
///
/// Each frame is processed to completion (stages go to `reporter`),
/// presented to `sink`, and then handed to `control`. A frame source error
/// ends the session with that error; a sheet that is not found in one frame
/// does not.
pub fn run_session(
    pipeline: &Pipeline,
    source: &mut dyn FrameSource,
    sink: &mut dyn FrameSink,
    store: &mut dyn ResultStore,
    reporter: &dyn ProgressReporter,
    mut control: impl FnMut(&FrameReport) -> LoopControl,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    loop {
        let frame = source.next_frame()?;
        let report = pipeline.process_reported(&frame, reporter);
        summary.frames += 1;
        if let Some(grade) = report.grade() {
            summary.graded += 1;
            summary.last_grade = Some(grade.clone());
        }

        sink.present(&report)?;

        let action = control(&report);
        if matches!(action, LoopControl::Save | LoopControl::SaveAndStop) {
            summary.saved.push(store.save(&report.composite)?);
        }
        if matches!(action, LoopControl::Stop | LoopControl::SaveAndStop) {
            break;
        }
    }

    info!(
        frames = summary.frames,
        graded = summary.graded,
        saved = summary.saved.len(),
        "Session finished"
    );
    Ok(summary)
}
