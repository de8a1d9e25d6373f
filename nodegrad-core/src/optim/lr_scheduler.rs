use super::Optimizer;
use crate::error::NodeGradError;

/// Adjusts the learning rate of an optimizer as training progresses.
pub trait LrScheduler {
    /// Advances the schedule by one step, applies the new learning rate to
    /// `optimizer` and returns it.
    fn step<O: Optimizer + ?Sized>(&mut self, optimizer: &mut O) -> f64;

    /// The learning rate for the current position in the schedule.
    fn current_lr(&self) -> f64;
}

/// Linear decay from `max_lr` to `min_lr` over `total_steps`, constant afterwards.
///
/// After `k` steps the rate is `max(max_lr - (max_lr - min_lr)·k/total_steps, min_lr)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDecay {
    max_lr: f64,
    min_lr: f64,
    total_steps: usize,
    steps_taken: usize,
}

impl LinearDecay {
    /// # Errors
    /// Returns `NodeGradError::Configuration` if `total_steps` is 0 or
    /// `min_lr > max_lr`.
    pub fn new(max_lr: f64, min_lr: f64, total_steps: usize) -> Result<Self, NodeGradError> {
        if total_steps == 0 {
            return Err(NodeGradError::Configuration(
                "linear decay needs at least one step".to_string(),
            ));
        }
        if min_lr > max_lr {
            return Err(NodeGradError::Configuration(format!(
                "linear decay minimum {} exceeds maximum {}",
                min_lr, max_lr
            )));
        }
        Ok(LinearDecay {
            max_lr,
            min_lr,
            total_steps,
            steps_taken: 0,
        })
    }

    /// Rate after `step` steps.
    pub fn value_at(&self, step: usize) -> f64 {
        let slope = (self.min_lr - self.max_lr) / self.total_steps as f64;
        (self.max_lr + slope * step as f64).max(self.min_lr)
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }
}

impl LrScheduler for LinearDecay {
    fn step<O: Optimizer + ?Sized>(&mut self, optimizer: &mut O) -> f64 {
        self.steps_taken += 1;
        let lr = self.current_lr();
        optimizer.set_learning_rate(lr);
        lr
    }

    fn current_lr(&self) -> f64 {
        self.value_at(self.steps_taken)
    }
}

#[cfg(test)]
#[path = "lr_scheduler_test.rs"]
mod tests;
