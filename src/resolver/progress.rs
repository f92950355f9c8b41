//! Progress reporting for batch resolution.
//!
//! With the `progress` feature, [`BatchProgress`] drives an `indicatif` bar; without it,
//! every method is a no-op so the resolver code stays identical in both builds.
#[cfg(feature = "progress")]
use std::time::Duration;

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

#[cfg(feature = "progress")]
pub(crate) struct BatchProgress(ProgressBar);

#[cfg(feature = "progress")]
impl BatchProgress {
    pub(crate) fn new(total: usize) -> Self {
        let pb = ProgressBar::new(total.max(1) as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} ({percent:>3}%) | {per_sec} | ETA {eta_precise}",
        ) {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(200));
        BatchProgress(pb)
    }

    #[inline]
    pub(crate) fn inc(&self) {
        self.0.inc(1);
    }

    pub(crate) fn finish(self) {
        self.0.finish_and_clear();
    }
}

#[cfg(not(feature = "progress"))]
pub(crate) struct BatchProgress;

#[cfg(not(feature = "progress"))]
impl BatchProgress {
    pub(crate) fn new(_total: usize) -> Self {
        BatchProgress
    }

    #[inline]
    pub(crate) fn inc(&self) {}

    pub(crate) fn finish(self) {}
}
