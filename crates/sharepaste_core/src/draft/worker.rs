//! Background thread that keeps draft writes off the editing thread.

use super::{Draft, DraftStore};
use crate::error::DraftError;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

enum DraftCmd {
    Save(Draft),
    SaveLanguage(String),
    Clear,
    Load { reply: Sender<Option<Draft>> },
}

/// Wraps a [`DraftStore`] so writes are queued to a worker thread.
///
/// Commands run in submission order, so a `load` observes every earlier `save`.
/// Dropping the handle flushes queued writes before returning.
pub struct BackgroundDraftStore {
    cmd_tx: Option<Sender<DraftCmd>>,
    worker: Option<JoinHandle<()>>,
}

fn run_cmd<S: DraftStore>(store: &mut S, cmd: DraftCmd) {
    match cmd {
        DraftCmd::Save(draft) => store.save(&draft),
        DraftCmd::SaveLanguage(language) => store.save_language(&language),
        DraftCmd::Clear => store.clear(),
        DraftCmd::Load { reply } => {
            let _ = reply.send(store.load());
        }
    }
}

fn run_worker<S: DraftStore>(mut store: S, cmd_rx: Receiver<DraftCmd>) {
    let mut coalesced = 0u64;
    for first in cmd_rx.iter() {
        let mut cmd = first;
        // A burst of keystroke saves collapses into its newest entry.
        while matches!(cmd, DraftCmd::Save(_)) {
            match cmd_rx.try_recv() {
                Ok(next @ DraftCmd::Save(_)) => {
                    coalesced = coalesced.saturating_add(1);
                    cmd = next;
                }
                Ok(next) => {
                    run_cmd(&mut store, cmd);
                    cmd = next;
                    break;
                }
                Err(_) => break,
            }
        }
        run_cmd(&mut store, cmd);
    }
    debug!(coalesced_saves = coalesced, "draft writer stopped");
}

impl BackgroundDraftStore {
    /// Move `store` onto a dedicated writer thread.
    ///
    /// # Errors
    /// Returns an error when the thread cannot be spawned.
    pub fn spawn<S>(store: S) -> Result<Self, DraftError>
    where
        S: DraftStore + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = unbounded();
        let worker = thread::Builder::new()
            .name("sharepaste-draft-writer".to_string())
            .spawn(move || run_worker(store, cmd_rx))?;
        Ok(Self {
            cmd_tx: Some(cmd_tx),
            worker: Some(worker),
        })
    }

    fn send(&self, cmd: DraftCmd) -> Result<(), DraftError> {
        self.cmd_tx
            .as_ref()
            .ok_or(DraftError::WorkerGone)?
            .send(cmd)
            .map_err(|_| DraftError::WorkerGone)
    }
}

impl DraftStore for BackgroundDraftStore {
    fn save(&mut self, draft: &Draft) {
        if let Err(err) = self.send(DraftCmd::Save(draft.clone())) {
            warn!("draft save dropped: {}", err);
        }
    }

    fn save_language(&mut self, language: &str) {
        if let Err(err) = self.send(DraftCmd::SaveLanguage(language.to_string())) {
            warn!("draft language save dropped: {}", err);
        }
    }

    fn load(&self) -> Option<Draft> {
        let (reply, reply_rx) = bounded(1);
        if let Err(err) = self.send(DraftCmd::Load { reply }) {
            warn!("draft load skipped: {}", err);
            return None;
        }
        reply_rx.recv().ok().flatten()
    }

    fn clear(&mut self) {
        if let Err(err) = self.send(DraftCmd::Clear) {
            warn!("draft clear dropped: {}", err);
        }
    }
}

impl Drop for BackgroundDraftStore {
    fn drop(&mut self) {
        drop(self.cmd_tx.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("draft writer thread panicked");
            }
        }
    }
}
