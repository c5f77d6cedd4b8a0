use crate::traits::ElementId;
use thiserror::Error;

/// Errors surfaced by the coordination layer.
///
/// Everything pointer-related degrades instead of failing; these cover
/// lifecycle misuse and bad configuration only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CursorError {
    /// The interaction store was accessed outside mount/unmount
    #[error("interaction store accessed while the cursor layer is not mounted")]
    NotMounted,

    #[error("element {0} is not registered as a magnetic widget")]
    UnknownWidget(ElementId),

    #[error("invalid cursor configuration: {0}")]
    InvalidConfig(String),
}
