//! Progress reporting for loads

use std::io::Write;

/// Receives step-numbered progress from the loader.
pub trait LoadObserver {
    /// A numbered step begins, e.g. `[2/5] Checking if DocType exists...`
    fn step(&mut self, _index: usize, _total: usize, _message: &str) {}

    /// Detail line under the current step
    fn detail(&mut self, _message: &str) {}
}

impl<T: LoadObserver + ?Sized> LoadObserver for &mut T {
    fn step(&mut self, index: usize, total: usize, message: &str) {
        (**self).step(index, total, message);
    }

    fn detail(&mut self, message: &str) {
        (**self).detail(message);
    }
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl LoadObserver for SilentObserver {}

/// Writes a human-readable progress trace
#[derive(Debug)]
pub struct ConsoleObserver<W: Write> {
    out: W,
}

impl ConsoleObserver<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LoadObserver for ConsoleObserver<W> {
    fn step(&mut self, index: usize, total: usize, message: &str) {
        let _ = writeln!(self.out, "\n[{}/{}] {}", index, total, message);
    }

    fn detail(&mut self, message: &str) {
        let _ = writeln!(self.out, "      {}", message);
    }
}
