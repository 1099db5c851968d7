use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use crate::recognition::domain::whitelist::WhitelistStore;
use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

use super::control::{CancellationToken, PauseSwitch};
use super::frame_transformer::FrameTransformer;
use super::job::{JobCallbacks, JobReport, StartError};

const EVENT_BUFFER: usize = 64;

/// Events emitted by a running job, in emission order.
#[derive(Debug)]
pub enum JobEvent {
    Progress { processed: usize, total: usize },
    Log(String),
    /// Processed frame for live preview. Sent best-effort: previews are
    /// dropped when the consumer lags, progress and logs never are.
    FramePreview(Frame),
    Finished(Result<JobReport, StartError>),
}

/// A job running on its own worker thread, observed through a channel.
///
/// The worker owns all pipeline components; the handle retains only the
/// control signals and the event receiver, so it can live on a UI thread.
pub struct BackgroundJob {
    events: Receiver<JobEvent>,
    cancellation: CancellationToken,
    pause: PauseSwitch,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundJob {
    pub fn spawn(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        transformer: FrameTransformer,
        source: PathBuf,
        destination: PathBuf,
        store: WhitelistStore,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::bounded::<JobEvent>(EVENT_BUFFER);
        let cancellation = CancellationToken::new();
        let pause = PauseSwitch::new();

        let worker_cancel = cancellation.clone();
        let worker_pause = pause.clone();
        let handle = thread::spawn(move || {
            let callbacks = wire_callbacks(&tx);
            let use_case = super::process_video_use_case::ProcessVideoUseCase::new(
                reader,
                writer,
                transformer,
                worker_cancel,
                worker_pause,
                callbacks,
            );
            let result = use_case.run(&source, &destination, &store);
            let _ = tx.send(JobEvent::Finished(result));
        });

        Self {
            events: rx,
            cancellation,
            pause,
            handle: Some(handle),
        }
    }

    pub fn events(&self) -> &Receiver<JobEvent> {
        &self.events
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn pause(&self) {
        self.pause.pause();
    }

    pub fn resume(&self) {
        self.pause.resume();
    }

    /// Waits for the worker to exit. Call after `Finished` was observed,
    /// or after `cancel` to block until the job winds down.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for BackgroundJob {
    fn drop(&mut self) {
        // Dropping the handle abandons, never blocks, the UI thread; the
        // worker keeps the channel's sender and exits on its own.
        self.cancellation.cancel();
    }
}

fn wire_callbacks(tx: &Sender<JobEvent>) -> JobCallbacks {
    let progress_tx = tx.clone();
    let log_tx = tx.clone();
    let frame_tx = tx.clone();
    JobCallbacks::none()
        .with_progress(move |processed, total| {
            let _ = progress_tx.send(JobEvent::Progress { processed, total });
        })
        .with_log(move |message| {
            let _ = log_tx.send(JobEvent::Log(message.to_string()));
        })
        .with_frame(move |frame| {
            let _ = frame_tx.try_send(JobEvent::FramePreview(frame.clone()));
        })
}
