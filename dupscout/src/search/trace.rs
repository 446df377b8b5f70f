/// Line appended when a traced run hits its step budget
pub const TRUNCATION_MARKER: &str = "...trace stopped (step limit reached)";

/// Signals that a traced run used up its step budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetExhausted;

/// Append-only, human-readable log of an algorithm's steps.
///
/// Lines and steps are tracked separately: an engine decides which of its
/// actions count as a step, and only steps are charged against the budget.
/// Once the budget is reached the marker line is appended and every later
/// call to [`Trace::step`] keeps failing.
#[derive(Debug, Clone)]
pub struct Trace {
    lines: Vec<String>,
    steps: usize,
    budget: usize,
}

impl Trace {
    pub fn new(budget: usize) -> Self {
        Self {
            lines: Vec::new(),
            steps: 0,
            budget,
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Charges one step against the budget
    pub(crate) fn step(&mut self) -> Result<(), BudgetExhausted> {
        self.steps += 1;
        if self.steps >= self.budget {
            self.lines.push(TRUNCATION_MARKER.to_string());
            return Err(BudgetExhausted);
        }
        Ok(())
    }

    /// Starts a new phase with a fresh step counter; lines are kept
    pub(crate) fn restart_steps(&mut self) {
        self.steps = 0;
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_budget() {
        let mut trace = Trace::new(3);
        trace.push("first");
        assert!(trace.step().is_ok());
        assert!(trace.step().is_ok());
        assert_eq!(trace.step(), Err(BudgetExhausted));
        assert_eq!(trace.into_lines(), ["first", TRUNCATION_MARKER]);
    }

    #[test]
    fn test_restart_keeps_lines() {
        let mut trace = Trace::new(2);
        trace.step().unwrap();
        trace.push("phase one done");
        trace.restart_steps();
        assert!(trace.step().is_ok());
        assert_eq!(trace.into_lines(), vec!["phase one done".to_string()]);
    }
}
