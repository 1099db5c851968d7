use std::path::Path;
use std::time::Duration;

use crate::recognition::domain::whitelist::WhitelistStore;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

use super::control::{CancellationToken, PauseSwitch};
use super::frame_transformer::FrameTransformer;
use super::job::{JobCallbacks, JobOutcome, JobReport, StartError};

/// Poll interval while paused.
const PAUSE_POLL: Duration = Duration::from_millis(50);

/// Orchestrates one whole-video job: read, transform, write.
///
/// Frames are processed sequentially by a single worker; ordering in the
/// output follows decode order by construction. This is a single-use
/// struct: `run` consumes it.
pub struct ProcessVideoUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    transformer: FrameTransformer,
    cancellation: CancellationToken,
    pause: PauseSwitch,
    callbacks: JobCallbacks,
}

impl ProcessVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        transformer: FrameTransformer,
        cancellation: CancellationToken,
        pause: PauseSwitch,
        callbacks: JobCallbacks,
    ) -> Self {
        Self {
            reader,
            writer,
            transformer,
            cancellation,
            pause,
            callbacks,
        }
    }

    /// Runs the job to a terminal state.
    ///
    /// `Err` means the job never started (no output was created beyond at
    /// most an empty destination file). Once running, every ending is
    /// expressed through [`JobOutcome`] in the report, including failure.
    pub fn run(
        mut self,
        source: &Path,
        destination: &Path,
        store: &WhitelistStore,
    ) -> Result<JobReport, StartError> {
        if store.is_empty() {
            return Err(StartError::EmptyWhitelist);
        }

        let metadata = match self.reader.open(source) {
            Ok(m) => m,
            Err(e) => {
                return Err(StartError::Source {
                    path: source.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        if let Err(e) = self.writer.open(destination, &metadata) {
            self.reader.close();
            return Err(StartError::Destination {
                path: destination.to_path_buf(),
                reason: e.to_string(),
            });
        }

        log::info!(
            "job started: {} ({}x{}, {} frames, whitelist of {})",
            source.display(),
            metadata.width,
            metadata.height,
            metadata.total_frames,
            store.len()
        );

        let total = metadata.total_frames;
        let mut outcome = JobOutcome::Completed;
        let mut frames_processed = 0usize;
        let mut faces_detected = 0usize;
        let mut faces_blurred = 0usize;

        {
            let Self {
                reader,
                writer,
                transformer,
                cancellation,
                pause,
                callbacks,
            } = &mut self;

            let mut frames = reader.frames();
            loop {
                while pause.is_paused() && !cancellation.is_cancelled() {
                    std::thread::sleep(PAUSE_POLL);
                }
                if cancellation.is_cancelled() {
                    outcome = JobOutcome::Cancelled;
                    break;
                }

                let mut frame = match frames.next() {
                    Some(Ok(frame)) => frame,
                    Some(Err(e)) => {
                        // Frame-level decode failure: skip, never substitute.
                        let msg = format!("skipping undecodable frame: {e}");
                        log::warn!("{msg}");
                        callbacks.log(&msg);
                        continue;
                    }
                    None => break,
                };

                let stats = transformer.transform(&mut frame, store);
                for diagnostic in &stats.diagnostics {
                    log::warn!("{diagnostic}");
                    callbacks.log(diagnostic);
                }
                faces_detected += stats.detected;
                faces_blurred += stats.blurred;

                if let Err(e) = writer.write(&frame) {
                    outcome = JobOutcome::Failed(format!("writing output failed: {e}"));
                    break;
                }

                frames_processed += 1;
                callbacks.frame(&frame);
                callbacks.progress(frames_processed, total);
            }
        }

        self.reader.close();
        if let Err(e) = self.writer.close() {
            // A container that fails to finalize is not a usable output.
            log::error!("closing output failed: {e}");
            if outcome == JobOutcome::Completed {
                outcome = JobOutcome::Failed(format!("closing output failed: {e}"));
            }
        }

        let report = JobReport {
            outcome,
            frames_processed,
            faces_detected,
            faces_blurred,
        };
        log::info!("{}", report.summary());
        Ok(report)
    }
}
