//! Modal text prompt seam.

/// Asks the user for a line of text; `None` means the prompt was dismissed.
pub trait Prompt {
    fn ask(&mut self, message: &str) -> Option<String>;
}

impl<F> Prompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn ask(&mut self, message: &str) -> Option<String> {
        self(message)
    }
}
