//! Progress reporting for long renders.

use std::io::{self, Stderr};

/// Receives progress updates from the draw engine.
///
/// Updates are best-effort: implementations must not influence the render.
pub trait Progress {
    /// Announce the total number of steps.
    fn set_target(&mut self, total: u64);
    /// Report that `current` steps have completed.
    fn tick(&mut self, current: u64);
    /// Finish and remove any on-screen indicator.
    fn clear(&mut self);
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_target(&mut self, _total: u64) {}
    fn tick(&mut self, _current: u64) {}
    fn clear(&mut self) {}
}

/// A terminal progress bar on stderr.
#[derive(Default)]
pub struct ProgressBar {
    /// Active bar, created when a target is set.
    bar: Option<pbr::ProgressBar<Stderr>>,
}

impl ProgressBar {
    /// Create an idle progress bar; nothing is drawn until a target is set.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for ProgressBar {
    fn set_target(&mut self, total: u64) {
        let mut bar = pbr::ProgressBar::on(io::stderr(), total);
        bar.format("╢▌▌░╟");
        bar.show_speed = false;
        self.bar = Some(bar);
    }

    fn tick(&mut self, current: u64) {
        if let Some(bar) = self.bar.as_mut() {
            bar.set(current);
        }
    }

    fn clear(&mut self) {
        if let Some(mut bar) = self.bar.take() {
            bar.finish();
        }
    }
}

/// Records every update; used to check the draw engine's reporting.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingProgress {
    /// Targets announced, in order.
    pub targets: Vec<u64>,
    /// Ticks received, in order.
    pub ticks: Vec<u64>,
    /// Number of `clear` calls.
    pub clears: usize,
}

#[cfg(test)]
impl Progress for RecordingProgress {
    fn set_target(&mut self, total: u64) {
        self.targets.push(total);
    }

    fn tick(&mut self, current: u64) {
        self.ticks.push(current);
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}
