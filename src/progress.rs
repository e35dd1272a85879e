//! Progress reporting for DCEL construction.
//!
//! Building a large mesh runs three passes over the input. A [`Progress`]
//! callback passed through [`BuildOptions`](crate::mesh::BuildOptions) is
//! told which pass is running and how far it has got.
//!
//! # Example
//!
//! ```
//! use dcel::progress::{BuildStage, Progress};
//!
//! let progress = Progress::new(|stage, current, total| {
//!     println!("[{:?}] {}/{}", stage, current, total);
//! });
//! progress.report(BuildStage::Rings, 0, 10);
//! ```

use std::fmt;

/// A construction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStage {
    /// Creating vertex records from the position buffer.
    Vertices,
    /// Creating one half-edge ring per triangle.
    Rings,
    /// Matching half-edges with their reversed counterparts.
    Twins,
}

/// A progress callback that receives updates during construction.
///
/// The callback receives the running stage, the number of items processed
/// so far in that stage, and the stage's item count.
pub struct Progress {
    callback: Box<dyn Fn(BuildStage, usize, usize) + Send + Sync>,
    every: usize,
}

impl Progress {
    /// Create a progress reporter that is called at every step.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(BuildStage, usize, usize) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
            every: 1,
        }
    }

    /// Only report every `every` steps (plus the final step of a stage).
    pub fn with_interval(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }

    /// Report progress unconditionally.
    #[inline]
    pub fn report(&self, stage: BuildStage, current: usize, total: usize) {
        (self.callback)(stage, current, total);
    }

    /// Report progress if `current` falls on the reporting interval or
    /// completes the stage.
    #[inline]
    pub fn tick(&self, stage: BuildStage, current: usize, total: usize) {
        if current % self.every == 0 || current == total {
            self.report(stage, current, total);
        }
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("every", &self.every)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_tick_respects_interval() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |stage, current, total| {
            sink.lock().unwrap().push((stage, current, total));
        })
        .with_interval(4);

        for i in 1..=10 {
            progress.tick(BuildStage::Twins, i, 10);
        }

        let seen = seen.lock().unwrap();
        let currents: Vec<_> = seen.iter().map(|&(_, c, _)| c).collect();
        assert_eq!(currents, vec![4, 8, 10]);
        assert!(seen.iter().all(|&(s, _, t)| s == BuildStage::Twins && t == 10));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let progress = Progress::new(|_, _, _| {}).with_interval(0);
        assert_eq!(progress.every, 1);
    }
}
