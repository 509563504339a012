use termdom::DomError;
use thiserror::Error;

/// Errors raised while wiring up or updating a scrollbar overlay.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrollbarError {
    /// The shadow tree lacks one of the elements the overlay drives.
    #[error("scrollbar template element '{id}' is missing")]
    MissingElement { id: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}
