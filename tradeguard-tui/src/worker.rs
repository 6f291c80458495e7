//! Background worker thread: image analysis runs here so the UI never
//! blocks on the network.
//!
//! Communication with the TUI main thread is via `mpsc` channels.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tradeguard_core::analysis::{AnalysisError, GeminiAnalyzer, ImageAnalyzer, ImageInput};
use tradeguard_core::config::AnalyzerSettings;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Analyze {
        image_path: PathBuf,
        api_key: String,
        settings: AnalyzerSettings,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    AnalysisDone { text: String },
    AnalysisFailed { error: String },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tradeguard-worker".into())
        .spawn(move || worker_loop(rx, tx))
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Analyze {
                image_path,
                api_key,
                settings,
            }) => {
                let resp = match analyze(&image_path, &api_key, &settings) {
                    Ok(text) => WorkerResponse::AnalysisDone { text },
                    Err(e) => {
                        tracing::warn!(error = %e, "analysis failed");
                        WorkerResponse::AnalysisFailed {
                            error: e.to_string(),
                        }
                    }
                };
                if tx.send(resp).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("worker stopped");
}

fn analyze(
    image_path: &Path,
    api_key: &str,
    settings: &AnalyzerSettings,
) -> Result<String, AnalysisError> {
    let input = ImageInput::from_path(image_path)?;
    let analyzer = GeminiAnalyzer::new(settings)?;
    analyzer.analyze(&input, api_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn unreadable_image_reports_failure() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx).unwrap();

        cmd_tx
            .send(WorkerCommand::Analyze {
                image_path: PathBuf::from("/definitely/not/here.png"),
                api_key: "k".into(),
                settings: AnalyzerSettings::default(),
            })
            .unwrap();

        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerResponse::AnalysisFailed { error } => {
                assert!(error.contains("here.png"), "{error}");
            }
            other => panic!("unexpected response: {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn exits_when_sender_dropped() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx).unwrap();
        drop(cmd_tx);
        handle.join().unwrap();
    }
}
