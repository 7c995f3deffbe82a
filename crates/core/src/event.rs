use std::fmt;

/// Which control of a bottom-buttons bar was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// The confirming control ("Ok" by default).
    Positive,
    /// The dismissing control ("Cancel" by default).
    Negative,
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonAction::Positive => f.write_str("positive"),
            ButtonAction::Negative => f.write_str("negative"),
        }
    }
}
