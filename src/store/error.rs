use derive_more::Display;

/// Failures surfaced by the in-memory stores. Unauthorized mutations are
/// reported rather than silently dropped; callers that want drop-on-deny
/// semantics ignore the error.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[display(fmt = "{} not found", _0)]
    NotFound(&'static str),
    #[display(fmt = "Not authorized for this task")]
    PermissionDenied,
    #[display(fmt = "Status change {} -> {} is not allowed", from, to)]
    InvalidTransition { from: String, to: String },
    #[display(fmt = "Comment text must not be empty")]
    EmptyComment,
    #[display(fmt = "Unknown employee id {}", _0)]
    UnknownAssignee(u64),
}

impl std::error::Error for StoreError {}
