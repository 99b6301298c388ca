//! Terminal confirmation prompts

use std::io::{self, BufRead, Write};

use annotation::Confirm;
use tracing::warn;

/// Asks on stderr and reads the answer from stdin
///
/// Anything starting with `y` or `Y` is a yes. A closed or unreadable stdin
/// counts as no.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{prompt} [y/N] ").and_then(|_| stderr.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                warn!("Could not read confirmation: {}", err);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim_start().starts_with(['y', 'Y'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  Yes"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes(""));
    }
}
