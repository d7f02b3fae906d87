//! Repeated, timed execution of one operation.
use std::{num::NonZeroUsize, time::Instant};
use crate::error::SchemeError;

/// Which iteration's output the caller keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retain {
    First,
    Last,
}

/// The mean duration of all iterations and the retained output.
#[derive(Clone, Debug, PartialEq)]
pub struct Timed<T> {
    pub mean_ms: f64,
    pub output: T,
}

/// An iteration of the wrapped operation failed; `iteration` starts at 1.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationFailed {
    pub iteration: usize,
    pub source: SchemeError,
}

#[derive(Clone, Copy, Debug)]
pub struct TimedRunner {
    iterations: NonZeroUsize,
}

impl TimedRunner {
    pub fn new(iterations: NonZeroUsize) -> Self {
        TimedRunner { iterations }
    }

    pub fn iterations(&self) -> usize {
        self.iterations.get()
    }

    /// Calls `op` once per iteration and averages the wall-clock time of the calls.
    pub fn run<T, F>(&self, retain: Retain, mut op: F) -> Result<Timed<T>, IterationFailed>
    where
        F: FnMut() -> Result<T, SchemeError>,
    {
        self.run_prepared(retain, || (), |_| op())
    }

    /// Like [`TimedRunner::run`], but every iteration first calls `prepare`
    /// outside the timed region and hands its result to `op`.
    pub fn run_prepared<I, T, P, F>(&self, retain: Retain, mut prepare: P, mut op: F) -> Result<Timed<T>, IterationFailed>
    where
        P: FnMut() -> I,
        F: FnMut(I) -> Result<T, SchemeError>,
    {
        let mut total_ms = 0.0;
        let (elapsed, first) = time_once(1, &mut prepare, &mut op)?;
        total_ms += elapsed;
        let mut output = first;
        for iteration in 2..=self.iterations.get() {
            let (elapsed, value) = time_once(iteration, &mut prepare, &mut op)?;
            total_ms += elapsed;
            if retain == Retain::Last {
                output = value;
            }
        }
        Ok(Timed {
            mean_ms: total_ms / self.iterations.get() as f64,
            output,
        })
    }
}

fn time_once<I, T, P, F>(iteration: usize, prepare: &mut P, op: &mut F) -> Result<(f64, T), IterationFailed>
where
    P: FnMut() -> I,
    F: FnMut(I) -> Result<T, SchemeError>,
{
    let input = prepare();
    let start = Instant::now();
    let result = op(input);
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(value) => Ok((elapsed, value)),
        Err(source) => Err(IterationFailed { iteration, source }),
    }
}
