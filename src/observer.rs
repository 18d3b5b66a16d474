//! Run observation: per-generation callbacks and a console progress bar.
//!
//! The engine never writes to stdout on its own. Callers that want live
//! feedback attach a [`GenerationObserver`]; everyone else passes `()`
//! and reads the history off the result.

use crate::runner::GenerationStats;
use std::io::Write;

/// Snapshot handed to the observer once per generation, after the
/// population has been sorted and recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 1-based generation number.
    pub generation: usize,
    /// Total generations budgeted for the run.
    pub total_generations: usize,
    /// Fitness summary of the current population.
    pub stats: GenerationStats,
    /// Best fitness seen so far across the whole run.
    pub best_fitness: f64,
}

/// Callback surface for watching a run.
///
/// Both methods default to no-ops, so an observer only implements what
/// it cares about. The unit type `()` is the silent observer.
pub trait GenerationObserver {
    /// Called once per generation.
    fn on_generation(&mut self, progress: &Progress) {
        let _ = progress;
    }

    /// Called when the run stops early because the best fitness failed
    /// to improve within the configured patience.
    fn on_stagnation(&mut self, generation: usize) {
        let _ = generation;
    }
}

impl GenerationObserver for () {}

/// Text progress bar written to any [`Write`] sink, typically stderr.
///
/// Renders a carriage-returned line per generation:
/// `||||||____________ 32.0% best 0.0125`. Write errors are swallowed;
/// a broken pipe must not kill the optimization.
///
/// # Examples
///
/// ```
/// use gabox::ProgressBar;
///
/// let mut bar = ProgressBar::new(std::io::stderr());
/// # let _ = &mut bar;
/// ```
pub struct ProgressBar<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> ProgressBar<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: 50 }
    }

    /// Sets the bar width in characters (default 50).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }
}

impl<W: Write> GenerationObserver for ProgressBar<W> {
    fn on_generation(&mut self, progress: &Progress) {
        let total = progress.total_generations.max(1) as f64;
        let fraction = progress.generation as f64 / total;
        let filled = ((self.width as f64 * fraction).round() as usize).min(self.width);
        let bar: String =
            "|".repeat(filled) + &"_".repeat(self.width - filled);
        let percent = 100.0 * fraction;
        let _ = write!(
            self.out,
            "\r{bar} {percent:.1}% best {best}",
            best = progress.best_fitness
        );
        let _ = self.out.flush();
    }

    fn on_stagnation(&mut self, generation: usize) {
        let _ = writeln!(
            self.out,
            "\nstopped at generation {generation}: best fitness no longer improving"
        );
        let _ = self.out.flush();
    }
}
