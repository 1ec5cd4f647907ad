//! Pull-driven production of artifacts.

use std::fmt;
use std::iter::FusedIterator;

use fetchline_fetch::HttpClient;
use tracing::debug;

use crate::artifact::Artifact;
use crate::descriptor::Descriptor;
use crate::orchestrator::Orchestrator;

/// Where the producer's cursor stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerState {
    /// Descriptors remain; the next pull starts more downloads.
    Idle,
    /// Inside a pull. `pull` holds `&mut self` for its whole run, so callers
    /// only ever see `Idle` or `Exhausted`.
    Pulling,
    /// Every descriptor has been started and the end has been signaled.
    Exhausted,
}

/// Receives artifacts from [`Producer::pull`].
pub trait ArtifactSink {
    /// Accept one artifact. Returning `false` asks the producer to stop
    /// starting downloads until the next pull; the artifact passed in is
    /// still delivered.
    fn push(&mut self, artifact: Artifact) -> bool;

    /// No further artifacts will follow. Called exactly once per producer.
    fn end(&mut self);
}

impl ArtifactSink for Vec<Artifact> {
    fn push(&mut self, artifact: Artifact) -> bool {
        Vec::push(self, artifact);
        true
    }

    fn end(&mut self) {}
}

/// Outcome of one [`Producer::pull`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pull {
    /// Downloads started, one artifact pushed for each.
    pub started: usize,
    /// Whether this pull signaled the end of the sequence.
    pub ended: bool,
}

/// Turns an ordered list of descriptors into artifacts, a pull at a time.
///
/// Downloads start when pulled, never ahead of demand, and artifacts are
/// handed out without waiting for their bodies.
pub struct Producer<C> {
    orchestrator: Orchestrator<C>,
    descriptors: Vec<Descriptor>,
    cursor: usize,
    state: ProducerState,
}

impl<C> fmt::Debug for Producer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("orchestrator", &self.orchestrator)
            .field("cursor", &self.cursor)
            .field("len", &self.descriptors.len())
            .field("state", &self.state)
            .finish()
    }
}

impl<C: HttpClient + 'static> Producer<C> {
    pub fn new(orchestrator: Orchestrator<C>, descriptors: Vec<Descriptor>) -> Self {
        Self {
            orchestrator,
            descriptors,
            cursor: 0,
            state: ProducerState::Idle,
        }
    }

    /// Start up to `requested` downloads, pushing each artifact into `sink` in
    /// input order.
    ///
    /// Stops early when `sink` refuses more or the descriptors run out. The
    /// pull that consumes the last descriptor also calls [`ArtifactSink::end`];
    /// pulls after that do nothing.
    pub fn pull<S: ArtifactSink + ?Sized>(&mut self, requested: usize, sink: &mut S) -> Pull {
        if self.state == ProducerState::Exhausted {
            return Pull::default();
        }
        self.state = ProducerState::Pulling;

        let mut started = 0;
        while started < requested && self.cursor < self.descriptors.len() {
            let descriptor = self.descriptors[self.cursor].clone();
            self.cursor += 1;
            started += 1;

            if !sink.push(self.orchestrator.start(descriptor)) {
                debug!(cursor = self.cursor, "sink full, pausing");
                break;
            }
        }

        let ended = self.cursor == self.descriptors.len();
        if ended {
            sink.end();
            self.state = ProducerState::Exhausted;
        } else {
            self.state = ProducerState::Idle;
        }
        debug!(requested, started, ended, remaining = self.remaining(), "pull");

        Pull { started, ended }
    }

    pub fn state(&self) -> ProducerState {
        self.state
    }

    /// Descriptors not yet started.
    pub fn remaining(&self) -> usize {
        self.descriptors.len() - self.cursor
    }

    pub fn orchestrator(&self) -> &Orchestrator<C> {
        &self.orchestrator
    }
}

/// Pulls one artifact per step.
impl<C: HttpClient + 'static> Iterator for Producer<C> {
    type Item = Artifact;

    fn next(&mut self) -> Option<Artifact> {
        let mut batch = Vec::with_capacity(1);
        self.pull(1, &mut batch);
        batch.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<C: HttpClient + 'static> ExactSizeIterator for Producer<C> {}

impl<C: HttpClient + 'static> FusedIterator for Producer<C> {}
