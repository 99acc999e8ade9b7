use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use log::info;
use log::warn;

/// Collects the durations of named phases, for example the individual
/// transformations of the minimisation pipeline.
#[derive(Default)]
pub struct Timing {
    results: Rc<RefCell<Vec<(String, f32)>>>,
}

/// Measures the time between its creation and the call to [`Timer::finish`].
///
/// `finish` must be called explicitly, a timer that is dropped before that
/// reports a warning and records nothing.
pub struct Timer {
    name: String,
    start: Instant,
    results: Rc<RefCell<Vec<(String, f32)>>>,
    registered: bool,
}

impl Timing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer with the given name.
    pub fn start(&mut self, name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            results: self.results.clone(),
            registered: false,
        }
    }

    /// Returns the finished timers in the order in which they finished.
    pub fn results(&self) -> Vec<(String, f32)> {
        self.results.borrow().clone()
    }

    /// Prints all the finished timers to stderr.
    pub fn print(&self) {
        for (name, time) in self.results.borrow().iter() {
            eprintln!("Time {name}: {time:.3}s");
        }
    }
}

impl Timer {
    /// Finishes the timer and registers the result.
    pub fn finish(&mut self) {
        let time = self.start.elapsed().as_secs_f64();
        info!("Time {}: {:.3}s", self.name, time);

        self.results.borrow_mut().push((self.name.clone(), time as f32));
        self.registered = true
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.registered {
            warn!("Timer {} was dropped before 'finish()'", self.name);
        }
    }
}
