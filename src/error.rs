/// Error type for template decoding operations.
///
/// Failures are always local to one entity or region; callers are
/// expected to skip the offending entry and keep processing the rest
/// of the template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Malformed entity position: {0}")]
    MalformedPos(String),
    #[error("Malformed bounds: {0}")]
    MalformedBounds(String),
    #[error("Malformed region: {0}")]
    MalformedRegion(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
