//! Cooperative chunked execution: [`Stepper`], [`Task`] and [`CancelToken`].
//!
//! A [`Task`] runs a stepper's body while its predicate holds, at most
//! `chunk_size` bodies per tick, waiting `period` between ticks. The host
//! keeps control between ticks: it can call [`Task::tick`] from its own
//! loop, block on [`Task::run`], or await [`Task::drive`]. Cancellation is
//! sampled at every chunk boundary, never in the middle of a body.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag.
#[derive(Clone, Debug)]
pub struct CancelToken {
    done: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Stepper
// ---------------------------------------------------------------------------

/// A predicate + body pair operating on some context `C`.
pub trait Stepper<C: ?Sized> {
    type Error;

    /// Whether another `step` should run.
    fn proceed(&self, ctx: &C) -> bool;

    /// Run one iteration of the body.
    fn step(&mut self, ctx: &mut C) -> Result<(), Self::Error>;
}

/// A [`Stepper`] built from two closures.
pub struct WhileLoop<P, B, E> {
    predicate: P,
    body: B,
    _error: PhantomData<fn() -> E>,
}

impl<P, B, E> WhileLoop<P, B, E> {
    pub fn new(predicate: P, body: B) -> Self {
        Self {
            predicate,
            body,
            _error: PhantomData,
        }
    }
}

impl<C, P, B, E> Stepper<C> for WhileLoop<P, B, E>
where
    C: ?Sized,
    P: Fn(&C) -> bool,
    B: FnMut(&mut C) -> Result<(), E>,
{
    type Error = E;

    #[inline]
    fn proceed(&self, ctx: &C) -> bool {
        (self.predicate)(ctx)
    }

    #[inline]
    fn step(&mut self, ctx: &mut C) -> Result<(), E> {
        (self.body)(ctx)
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Pacing knobs: throughput per tick and wall-clock gap between ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    pub chunk_size: usize,
    pub period: Duration,
}

impl Schedule {
    /// Chunk size used when a schedule asks for zero steps per tick.
    pub const DEFAULT_CHUNK: usize = 10;

    pub const fn new(chunk_size: usize, period: Duration) -> Self {
        Self { chunk_size, period }
    }

    /// `chunk_size` steps every `millis` milliseconds.
    pub const fn paced(chunk_size: usize, millis: u64) -> Self {
        Self::new(chunk_size, Duration::from_millis(millis))
    }

    /// Everything in a single tick.
    pub const fn unpaced() -> Self {
        Self::new(usize::MAX, Duration::ZERO)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(())
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::paced(Self::DEFAULT_CHUNK, 0)
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// How a task ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The predicate turned false.
    Finished,
    /// The cancel token was observed at a chunk boundary.
    Cancelled,
}

/// Result of one [`Task::tick`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The period has not elapsed since the previous tick.
    Waiting(Duration),
    /// A full chunk ran; the task is still going.
    Ran(usize),
    /// The task just ended. Reported exactly once.
    Complete(Completion),
    /// The task had already ended (or failed) before this tick.
    Spent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Running,
    Done(Completion),
    Failed,
}

/// A stepper under a [`Schedule`].
pub struct Task<S> {
    stepper: S,
    schedule: Schedule,
    cancel: CancelToken,
    last_tick: Option<Instant>,
    steps: usize,
    state: State,
}

impl<S> Task<S> {
    /// A task over `stepper`. A zero `chunk_size` runs
    /// [`Schedule::DEFAULT_CHUNK`] steps per tick instead.
    pub fn new(stepper: S, mut schedule: Schedule) -> Self {
        if schedule.chunk_size == 0 {
            log::warn!("zero chunk size, using {}", Schedule::DEFAULT_CHUNK);
            schedule.chunk_size = Schedule::DEFAULT_CHUNK;
        }
        Self {
            stepper,
            schedule,
            cancel: CancelToken::new(),
            last_tick: None,
            steps: 0,
            state: State::Running,
        }
    }

    /// Replace the cancel token, e.g. to share one across several tasks.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that cancels this task at its next chunk boundary.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    pub fn stepper_mut(&mut self) -> &mut S {
        &mut self.stepper
    }

    pub fn into_inner(self) -> S {
        self.stepper
    }

    /// Bodies executed so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether the task has ended, for any reason.
    pub fn is_finished(&self) -> bool {
        self.state != State::Running
    }

    /// How the task ended, if it ended without error.
    pub fn completion(&self) -> Option<Completion> {
        match self.state {
            State::Done(c) => Some(c),
            State::Running | State::Failed => None,
        }
    }

    /// Run one chunk.
    ///
    /// The predicate is checked before every body. A body error halts the
    /// task and is returned as-is; mutations done so far stay in place.
    pub fn tick<C>(&mut self, ctx: &mut C) -> Result<Tick, S::Error>
    where
        C: ?Sized,
        S: Stepper<C>,
    {
        if self.state != State::Running {
            return Ok(Tick::Spent);
        }
        if let Some(last) = self.last_tick {
            let elapsed = last.elapsed();
            if elapsed < self.schedule.period {
                return Ok(Tick::Waiting(self.schedule.period - elapsed));
            }
        }
        self.last_tick = Some(Instant::now());

        if self.cancel.is_cancelled() {
            log::debug!("task cancelled after {} steps", self.steps);
            return Ok(self.complete(Completion::Cancelled));
        }

        let mut ran = 0;
        while ran < self.schedule.chunk_size {
            if !self.stepper.proceed(ctx) {
                return Ok(self.complete(Completion::Finished));
            }
            if let Err(e) = self.stepper.step(ctx) {
                self.state = State::Failed;
                return Err(e);
            }
            ran += 1;
            self.steps += 1;
        }
        Ok(Tick::Ran(ran))
    }

    /// Tick until the task ends, sleeping through the waits.
    ///
    /// A task that already failed reports [`Completion::Cancelled`].
    pub fn run<C>(&mut self, ctx: &mut C) -> Result<Completion, S::Error>
    where
        C: ?Sized,
        S: Stepper<C>,
    {
        loop {
            match self.tick(ctx)? {
                Tick::Waiting(d) => thread::sleep(d),
                Tick::Ran(_) => {}
                Tick::Complete(c) => return Ok(c),
                Tick::Spent => return Ok(self.completion().unwrap_or(Completion::Cancelled)),
            }
        }
    }

    /// A future that runs one chunk per poll and resolves when the task ends.
    ///
    /// While the period has not elapsed the future stays pending; a sleeper
    /// thread wakes it once the wait is over.
    pub fn drive<'t, 'c, C>(&'t mut self, ctx: &'c mut C) -> Drive<'t, 'c, S, C>
    where
        C: ?Sized,
        S: Stepper<C>,
    {
        Drive { task: self, ctx }
    }

    fn complete(&mut self, c: Completion) -> Tick {
        self.state = State::Done(c);
        Tick::Complete(c)
    }
}

/// Future returned by [`Task::drive`].
pub struct Drive<'t, 'c, S, C: ?Sized> {
    task: &'t mut Task<S>,
    ctx: &'c mut C,
}

impl<S, C> Future for Drive<'_, '_, S, C>
where
    C: ?Sized,
    S: Stepper<C>,
{
    type Output = Result<Completion, S::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match this.task.tick(&mut *this.ctx) {
            Err(e) => Poll::Ready(Err(e)),
            Ok(Tick::Complete(c)) => Poll::Ready(Ok(c)),
            Ok(Tick::Spent) => Poll::Ready(Ok(this
                .task
                .completion()
                .unwrap_or(Completion::Cancelled))),
            Ok(Tick::Ran(_)) => {
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Ok(Tick::Waiting(d)) => {
                let waker = cx.waker().clone();
                thread::spawn(move || {
                    thread::sleep(d);
                    waker.wake();
                });
                Poll::Pending
            }
        }
    }
}
