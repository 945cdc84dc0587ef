// TUI application state
//
// One struct owns all view state - the selected file, the upload state, the
// typing scheduler, intake, prompt and toast - and every transition goes
// through a named method here. The conversion worker never touches state
// directly: it reports through the event channel, and completions tagged
// with a superseded generation are discarded (latest submission wins).

use super::prompt::PathPrompt;
use super::toast::Toast;
use crate::config::Config;
use crate::convert::{Converter, UploadState};
use crate::demo;
use crate::download;
use crate::events::ConvertEvent;
use crate::intake::{self, DropZone};
use crate::logging::LogBuffer;
use crate::payload::ResultPayload;
use crate::typing::Typewriter;
use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

/// Main application state for the TUI
pub struct App {
    pub config: Config,

    /// Name of the currently selected file (empty when none)
    pub file_name: String,

    /// Upload lifecycle state
    pub upload: UploadState,

    /// Last conversion result; replaced wholesale per upload
    pub payload: Option<ResultPayload>,

    /// Typing scheduler owning the preview text
    pub typewriter: Typewriter,

    /// Drop-target state for the intake card
    pub drop_zone: DropZone,

    /// Path prompt overlay, when open
    pub prompt: Option<PathPrompt>,

    /// Transient notification, when showing
    pub toast: Option<Toast>,

    /// Captured logs for the logs panel
    pub log_buffer: LogBuffer,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Redraw tick counter (drives the blinking cursor)
    pub tick_count: u64,

    converter: Converter,
    events_tx: mpsc::Sender<ConvertEvent>,

    /// Generation of the most recent submission
    submission: u64,

    /// When the app started; animation deadlines are ms since this instant
    started: Instant,
}

impl App {
    pub fn new(
        config: Config,
        log_buffer: LogBuffer,
        events_tx: mpsc::Sender<ConvertEvent>,
    ) -> Result<Self> {
        let converter = Converter::new(
            config.upload_url.clone(),
            std::time::Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            config,
            file_name: String::new(),
            upload: UploadState::Idle,
            payload: None,
            typewriter: Typewriter::new(),
            drop_zone: DropZone::new(),
            prompt: None,
            toast: None,
            log_buffer,
            should_quit: false,
            tick_count: 0,
            converter,
            events_tx,
            submission: 0,
            started: Instant::now(),
        })
    }

    /// Milliseconds since app start; the time base for animation deadlines.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Wall-clock instant for an animation deadline in ms.
    pub fn deadline_instant(&self, due_ms: u64) -> tokio::time::Instant {
        tokio::time::Instant::from_std(self.started + std::time::Duration::from_millis(due_ms))
    }

    /// Submit a file for conversion. Replaces all transient state from any
    /// prior submission and starts the placeholder animation.
    pub fn submit(&mut self, path: PathBuf) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if !intake::has_accepted_extension(&path) {
            tracing::warn!(file = %name, "extension outside the accepted set; submitting anyway");
        }

        self.file_name = name;
        self.upload = UploadState::Pending;
        self.payload = None;
        self.submission += 1;
        let generation = self.submission;

        let now = self.now_ms();
        self.typewriter.start_placeholder(now);
        tracing::info!(file = %self.file_name, generation, "submitting file");

        let tx = self.events_tx.clone();
        if self.config.demo_mode {
            tokio::spawn(demo::run_demo_conversion(
                generation,
                self.file_name.clone(),
                tx,
            ));
        } else {
            let converter = self.converter.clone();
            tokio::spawn(async move {
                let outcome = converter.convert(&path).await;
                let _ = tx.send(ConvertEvent::Finished { generation, outcome }).await;
            });
        }
    }

    /// Outcome of the picker: a file submits, a cancel resets everything.
    pub fn file_chosen(&mut self, choice: Option<PathBuf>) {
        match choice {
            Some(path) => self.submit(path),
            None => self.clear_selection(),
        }
    }

    /// Reset SelectedFile, upload state and any displayed error to idle.
    pub fn clear_selection(&mut self) {
        self.file_name.clear();
        self.payload = None;
        self.upload = UploadState::Idle;
        self.typewriter.stop();
    }

    /// Apply a completion from the conversion worker.
    pub fn on_convert_event(&mut self, event: ConvertEvent) {
        let ConvertEvent::Finished { generation, outcome } = event;
        if generation != self.submission {
            tracing::debug!(
                generation,
                current = self.submission,
                "discarding result of a superseded submission"
            );
            return;
        }

        let now = self.now_ms();
        match outcome {
            Ok(payload) => match payload.canonical_text() {
                Ok(text) => {
                    self.upload = UploadState::Succeeded;
                    self.payload = Some(payload);
                    self.typewriter.start_result(&text, now);
                    tracing::info!(file = %self.file_name, "conversion succeeded");
                }
                Err(e) => {
                    self.upload = UploadState::Failed(format!("Error rendering result: {e:#}"));
                    self.payload = None;
                    self.typewriter.stop();
                }
            },
            Err(message) => {
                tracing::warn!(%message, "conversion failed");
                self.upload = UploadState::Failed(message);
                self.typewriter.stop();
            }
        }
    }

    /// Save the result as `<basename>.json` in the output directory.
    pub fn download(&mut self) {
        if matches!(self.upload, UploadState::Pending) {
            return;
        }
        let Some(payload) = &self.payload else {
            self.show_toast("Nothing to save yet");
            return;
        };
        match download::save_json(payload, &self.file_name, &self.config.output_dir) {
            Ok(path) => self.show_toast(format!("✓ Saved {}", path.display())),
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "saving result failed");
                self.show_toast("✗ Save failed");
            }
        }
    }

    /// Copy the full canonical result to the system clipboard.
    pub fn copy_preview(&mut self) {
        let Some(payload) = &self.payload else {
            self.show_toast("Nothing to copy yet");
            return;
        };
        let Ok(text) = payload.canonical_text() else {
            self.show_toast("✗ Failed to copy");
            return;
        };
        if super::clipboard::copy_to_clipboard(&text).is_ok() {
            self.show_toast("✓ Copied to clipboard");
        } else {
            self.show_toast("✗ Failed to copy");
        }
    }

    /// Open the path prompt (the click-to-browse affordance).
    pub fn activate_picker(&mut self) {
        if self.prompt.is_none() {
            self.prompt = Some(PathPrompt::new());
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Periodic redraw tick: advances the cursor blink and expires toasts.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Blink phase for the preview cursor (tick interval is 200 ms).
    pub fn cursor_visible(&self) -> bool {
        self.tick_count % 4 < 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_app() -> App {
        let (tx, _rx) = mpsc::channel(8);
        let config = Config {
            demo_mode: true,
            ..Config::default()
        };
        App::new(config, LogBuffer::new(), tx).unwrap()
    }

    fn drain_placeholder_some(app: &mut App, chars: usize) {
        for _ in 0..chars {
            let (due, gen) = app.typewriter.next_deadline().unwrap();
            app.typewriter.poll(gen, due);
        }
    }

    #[tokio::test]
    async fn test_submit_enters_pending_and_starts_placeholder() {
        let mut app = demo_app();
        app.submit(PathBuf::from("/tmp/report.pdf"));

        assert_eq!(app.file_name, "report.pdf");
        assert!(matches!(app.upload, UploadState::Pending));
        assert!(app.payload.is_none());
        assert_eq!(
            app.typewriter.active(),
            crate::typing::ActiveAnimator::Placeholder
        );
    }

    #[tokio::test]
    async fn test_resubmission_clears_display_before_new_run() {
        let mut app = demo_app();
        app.submit(PathBuf::from("/tmp/a.pdf"));
        drain_placeholder_some(&mut app, 5);
        assert!(!app.typewriter.display().is_empty());

        app.submit(PathBuf::from("/tmp/b.pdf"));
        assert_eq!(app.file_name, "b.pdf");
        assert_eq!(app.typewriter.display(), "");
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let mut app = demo_app();
        app.submit(PathBuf::from("/tmp/a.pdf"));
        app.submit(PathBuf::from("/tmp/b.pdf"));

        // Completion of the first (superseded) submission arrives late
        app.on_convert_event(ConvertEvent::Finished {
            generation: 1,
            outcome: Ok(ResultPayload::Text("stale".into())),
        });
        assert!(matches!(app.upload, UploadState::Pending));
        assert!(app.payload.is_none());

        // The current submission's completion applies
        app.on_convert_event(ConvertEvent::Finished {
            generation: 2,
            outcome: Ok(ResultPayload::Text("fresh".into())),
        });
        assert!(matches!(app.upload, UploadState::Succeeded));
        assert_eq!(app.payload, Some(ResultPayload::Text("fresh".into())));
    }

    #[tokio::test]
    async fn test_success_starts_result_reveal() {
        let mut app = demo_app();
        app.submit(PathBuf::from("/tmp/a.pdf"));
        app.on_convert_event(ConvertEvent::Finished {
            generation: 1,
            outcome: Ok(ResultPayload::Structured(serde_json::json!({"x": 1}))),
        });

        assert_eq!(app.typewriter.active(), crate::typing::ActiveAnimator::Result);
        assert_eq!(app.typewriter.display(), "", "reveal restarts from empty");

        while let Some((due, gen)) = app.typewriter.next_deadline() {
            app.typewriter.poll(gen, due);
        }
        assert_eq!(app.typewriter.display(), "{\n  \"x\": 1\n}");
    }

    #[tokio::test]
    async fn test_failure_sets_message_and_stops_typing() {
        let mut app = demo_app();
        app.submit(PathBuf::from("/tmp/a.pdf"));
        drain_placeholder_some(&mut app, 3);

        app.on_convert_event(ConvertEvent::Finished {
            generation: 1,
            outcome: Err("Error processing file: bad format".into()),
        });

        assert_eq!(
            app.upload,
            UploadState::Failed("Error processing file: bad format".into())
        );
        assert!(!app.typewriter.is_running());
        assert_eq!(app.typewriter.display(), "");
    }

    #[tokio::test]
    async fn test_picker_cancel_resets_state() {
        let mut app = demo_app();
        app.submit(PathBuf::from("/tmp/a.pdf"));
        app.on_convert_event(ConvertEvent::Finished {
            generation: 1,
            outcome: Err("Error processing file: boom".into()),
        });

        app.file_chosen(None);
        assert!(app.file_name.is_empty());
        assert_eq!(app.upload, UploadState::Idle);
        assert!(app.payload.is_none());
        assert_eq!(app.typewriter.display(), "");
    }

    #[tokio::test]
    async fn test_download_writes_named_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app();
        app.config.output_dir = dir.path().to_path_buf();

        app.submit(PathBuf::from("/tmp/report.pdf"));
        app.on_convert_event(ConvertEvent::Finished {
            generation: 1,
            outcome: Ok(ResultPayload::Structured(serde_json::json!({"x": 1}))),
        });

        app.download();
        let saved = dir.path().join("report.json");
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "{\n  \"x\": 1\n}");
    }

    #[tokio::test]
    async fn test_download_refused_while_pending() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = demo_app();
        app.config.output_dir = dir.path().to_path_buf();

        app.submit(PathBuf::from("/tmp/report.pdf"));
        app.download();
        assert!(!dir.path().join("report.json").exists());
    }
}
