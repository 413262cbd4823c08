// src/progress.rs
/// Lightweight progress reporting for long-running dataset runs.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called when a dataset run starts.
    fn begin(&mut self, _dataset: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page captured: `added` new rows, `total` accumulated so far.
    fn page_done(&mut self, _page: usize, _added: usize, _total: usize) {}

    /// Called at the end of a dataset run, successful or not.
    fn finish(&mut self, _ok: bool) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
