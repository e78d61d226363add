//! Fire-and-forget clipboard writes.
//!
//! Copy commands hand text to a [`ClipboardSink`] and return immediately. The system clipboard is
//! served by one worker thread that owns the `arboard` handle for the whole session (on X11 the
//! clipboard contents only live as long as that handle). Finished writes are collected by
//! polling, each carrying the ticket of the request it answers.

use crate::error::{Error, Result};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Identifies one submitted write.
pub struct CopyTicket(pub u64);

#[derive(Debug)]
/// Result of one finished write.
pub struct CopyOutcome {
    /// The request this answers.
    pub ticket: CopyTicket,
    /// Characters written, or why the write failed.
    pub result: Result<usize>,
}

/// Write-only asynchronous text sink.
pub trait ClipboardSink {
    /// Queues `text` for writing and returns without waiting.
    fn submit(&mut self, text: String) -> CopyTicket;

    /// Drains the writes that finished since the last poll.
    fn poll(&mut self) -> Vec<CopyOutcome>;
}

struct CopyRequest {
    ticket: CopyTicket,
    text: String,
}

/// The desktop clipboard, written from a background thread.
pub struct SystemClipboard {
    requests: Sender<CopyRequest>,
    outcomes: Receiver<CopyOutcome>,
    undelivered: Vec<CopyOutcome>,
    next_ticket: u64,
}

impl SystemClipboard {
    #[must_use]
    /// Starts the clipboard worker.
    ///
    /// If the clipboard cannot be opened, the worker still runs and answers every request with
    /// the open error, so callers see one failure per copy instead of a silent no-op.
    pub fn spawn() -> Self {
        let (requests, request_rx) = mpsc::channel::<CopyRequest>();
        let (outcome_tx, outcomes) = mpsc::channel();

        thread::spawn(move || {
            let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string());
            if let Err(e) = &clipboard {
                tracing::warn!("clipboard unavailable: {e}");
            }
            for request in request_rx {
                let result = match clipboard.as_mut() {
                    Ok(cb) => {
                        let chars = request.text.chars().count();
                        cb.set_text(request.text).map(|()| chars).map_err(Error::from)
                    }
                    Err(e) => Err(Error::Clipboard(e.clone())),
                };
                let outcome = CopyOutcome {
                    ticket: request.ticket,
                    result,
                };
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            requests,
            outcomes,
            undelivered: Vec::new(),
            next_ticket: 0,
        }
    }
}

impl ClipboardSink for SystemClipboard {
    fn submit(&mut self, text: String) -> CopyTicket {
        let ticket = CopyTicket(self.next_ticket);
        self.next_ticket += 1;
        tracing::debug!(ticket = ticket.0, bytes = text.len(), "queued clipboard write");
        if self.requests.send(CopyRequest { ticket, text }).is_err() {
            tracing::error!("clipboard worker has stopped");
            self.undelivered.push(CopyOutcome {
                ticket,
                result: Err(Error::Clipboard("clipboard worker has stopped".to_string())),
            });
        }
        ticket
    }

    fn poll(&mut self) -> Vec<CopyOutcome> {
        let mut done: Vec<_> = self.undelivered.drain(..).collect();
        done.extend(self.outcomes.try_iter());
        done
    }
}
