/// Asks the user to confirm a destructive action.
///
/// Implemented for any `FnMut(&str) -> bool`, so a UI can pass a closure
/// that shows a dialog.
pub trait Confirm {
    /// Show `prompt` and return whether the user accepted
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Fixed answer, for non-interactive callers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}
