//! Calculator screen state
//!
//! Holds the expression being typed, the live output label and the
//! chronological history of successful evaluations.

use crate::calc;

/// One successful evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalculatorState {
    /// Raw expression text in the entry field
    pub input: String,
    /// Live output label (last good result, or the error text after "=")
    pub output: String,
    /// Append-only, oldest first
    pub history: Vec<HistoryEntry>,
    /// Whether the history panel is visible
    pub show_history: bool,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry text changed: refresh the live output if the input is valid
    pub fn on_input_changed(&mut self, text: String) {
        self.input = text;
        self.refresh_output();
    }

    /// Append a keypad token ("7", "(", "+", ...)
    pub fn push_token(&mut self, token: &str) {
        self.input.push_str(token);
        self.refresh_output();
    }

    /// Remove the last character, if any
    pub fn backspace(&mut self) {
        if self.input.pop().is_some() {
            self.refresh_output();
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.refresh_output();
    }

    /// The "=" button
    ///
    /// On success the pair is appended to history and the input is replaced
    /// by the result. On failure only the output label changes.
    pub fn on_evaluate(&mut self) -> Result<(), calc::EvalError> {
        let (text, result) = calc::eval_display(&self.input);
        match result {
            Ok(()) => {
                self.history.push(HistoryEntry {
                    expression: self.input.clone(),
                    result: text.clone(),
                });
                self.input = text;
                Ok(())
            }
            Err(err) => {
                self.output = text;
                Err(err)
            }
        }
    }

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    fn refresh_output(&mut self) {
        if self.input.is_empty() {
            self.output.clear();
            return;
        }
        let (text, result) = calc::eval_display(&self.input);
        if result.is_ok() {
            self.output = text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_output_tracks_valid_input() {
        let mut state = CalculatorState::new();
        state.on_input_changed("2+3".into());
        assert_eq!(state.output, "5");

        // Incomplete input leaves the last good value in place
        state.on_input_changed("2+3*".into());
        assert_eq!(state.output, "5");

        state.on_input_changed(String::new());
        assert_eq!(state.output, "");
    }

    #[test]
    fn test_evaluate_success_appends_history() {
        let mut state = CalculatorState::new();
        state.on_input_changed("2+3*4".into());
        assert!(state.on_evaluate().is_ok());

        assert_eq!(state.input, "14");
        assert_eq!(
            state.history,
            vec![HistoryEntry {
                expression: "2+3*4".into(),
                result: "14".into()
            }]
        );
        assert_eq!(state.history[0].to_string(), "2+3*4 = 14");
    }

    #[test]
    fn test_evaluate_failure_leaves_history_untouched() {
        let mut state = CalculatorState::new();
        state.on_input_changed("1+1".into());
        state.on_evaluate().unwrap();

        state.on_input_changed("2+".into());
        assert!(state.on_evaluate().is_err());
        assert_eq!(state.output, calc::INVALID_EXPRESSION);
        assert_eq!(state.input, "2+");
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_keypad_editing() {
        let mut state = CalculatorState::new();
        for token in ["(", "1", "+", "2", ")", "*", "3"] {
            state.push_token(token);
        }
        assert_eq!(state.input, "(1+2)*3");
        assert_eq!(state.output, "9");

        state.backspace();
        assert_eq!(state.input, "(1+2)*");

        state.clear();
        assert!(state.input.is_empty());
        assert!(state.output.is_empty());

        // Backspace on empty input is a no-op
        state.backspace();
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_toggle_history() {
        let mut state = CalculatorState::new();
        assert!(!state.show_history);
        state.toggle_history();
        assert!(state.show_history);
        state.toggle_history();
        assert!(!state.show_history);
    }
}
