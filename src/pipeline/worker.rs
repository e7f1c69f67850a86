// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Background thread that runs debounced passes for one document.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use tracing::{debug, trace};

use crate::braces::TagRecord;
use crate::config::BraceOptions;
use crate::document::{DocumentVersion, TextSource};
use crate::pipeline::{BraceTagger, PendingPass, TagSink, TagStore, Trigger};
use crate::span::Span;
use crate::syntax::ClassificationSource;

enum Command {
    Trigger(Trigger),
    SetOptions(BraceOptions),
    Stop,
}

/// Owns a [`BraceTagger`] on a worker thread.
///
/// Notifications return immediately; passes run on the worker once the
/// debounce delay has passed without a new notification. Only one pass runs
/// at a time. Dropping the worker stops it.
pub struct BraceWorker {
    commands: Sender<Command>,
    tags: TagStore,
    handle: Option<JoinHandle<()>>,
}

impl BraceWorker {
    /// Starts the worker and schedules an initial pass.
    pub fn start<S, C, K>(tagger: BraceTagger<S, C, K>) -> io::Result<Self>
    where
        S: TextSource + Send + 'static,
        C: ClassificationSource + Send + 'static,
        K: TagSink + Send + 'static,
    {
        let (commands, receiver) = crossbeam_channel::unbounded();
        let tags = tagger.tag_store();
        let handle = thread::Builder::new()
            .name("brace-tagger".into())
            .spawn(move || run(tagger, receiver))?;

        let worker = Self {
            commands,
            tags,
            handle: Some(handle),
        };
        worker.send(Command::Trigger(Trigger::ViewportChanged));
        Ok(worker)
    }

    /// The text changed at `position`, producing `version`.
    pub fn notify_edit(&self, position: usize, version: DocumentVersion) {
        self.send(Command::Trigger(Trigger::Edit { position, version }));
    }

    pub fn notify_viewport_changed(&self) {
        self.send(Command::Trigger(Trigger::ViewportChanged));
    }

    /// Drops the cache and recomputes everything.
    pub fn reset(&self) {
        self.send(Command::Trigger(Trigger::Reset));
    }

    pub fn set_options(&self, options: BraceOptions) {
        self.send(Command::SetOptions(options));
    }

    /// Tags intersecting `range` from the last completed pass.
    pub fn tags(&self, range: Span) -> Vec<TagRecord> {
        self.tags.read().tags_in(range).copied().collect()
    }

    /// Stops the worker, waiting for a running pass to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn send(&self, command: Command) {
        // Fails only once the worker has exited.
        let _ = self.commands.send(command);
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.send(Command::Stop);
            if handle.join().is_err() {
                debug!("brace worker panicked");
            }
        }
    }
}

impl Drop for BraceWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<S, C, K>(mut tagger: BraceTagger<S, C, K>, commands: Receiver<Command>)
where
    S: TextSource,
    C: ClassificationSource,
    K: TagSink,
{
    let mut pending = PendingPass::new(tagger.options().debounce_delay());
    loop {
        let received = match pending.deadline() {
            Some(deadline) => commands.recv_deadline(deadline),
            None => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(Command::Trigger(trigger)) => pending.push(trigger, Instant::now()),
            Ok(Command::SetOptions(options)) => {
                pending.set_delay(options.debounce_delay());
                tagger.set_options(options);
                pending.push(Trigger::ViewportChanged, Instant::now());
            }
            Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if let Some(trigger) = pending.take_due(Instant::now()) {
            // Failures are logged by the pass and leave the previous tags in place.
            if let Ok(outcome) = tagger.handle(trigger) {
                trace!(?outcome, "brace pass finished");
            }
        }
    }
    debug!("brace worker stopped");
}
