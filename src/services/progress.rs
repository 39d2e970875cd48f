//! Progress notifications emitted while a copy runs

use serde::Serialize;

/// One progress notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    /// Human-readable description of the current step
    pub message: String,
    /// 1-based index of the step being reported
    pub current_step: usize,
    /// Total number of steps in the operation
    pub total_steps: usize,
}

impl ProgressUpdate {
    pub fn new(message: impl Into<String>, current_step: usize, total_steps: usize) -> Self {
        Self {
            message: message.into(),
            current_step,
            total_steps,
        }
    }

    /// Completion ratio in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        if self.total_steps == 0 {
            return 1.0;
        }
        (self.current_step as f64 / self.total_steps as f64).clamp(0.0, 1.0)
    }
}

/// Callback receiving progress notifications on the calling thread
pub type ProgressCallback<'a> = Box<dyn FnMut(&ProgressUpdate) + 'a>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        assert_eq!(ProgressUpdate::new("x", 1, 4).fraction(), 0.25);
        assert_eq!(ProgressUpdate::new("x", 4, 4).fraction(), 1.0);
        assert_eq!(ProgressUpdate::new("x", 0, 0).fraction(), 1.0);
    }
}
