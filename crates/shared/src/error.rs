use thiserror::Error;

/// Why a marker reposition did not go through.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepositionError {
    #[error("markers are not draggable in the current mode")]
    NotDraggable,
    #[error("unknown marker: {0}")]
    UnknownMarker(String),
    #[error("map container has no usable size")]
    DegenerateContainer,
    #[error("failed to save marker position: {0}")]
    Persist(String),
}
