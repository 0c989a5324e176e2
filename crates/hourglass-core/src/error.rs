/// Errors that can occur across the hourglass workspace.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the
/// boundary.
///
/// # Examples
///
/// ```
/// use hourglass_core::HourglassError;
///
/// let err = HourglassError::Fetch("repository not found".into());
/// assert!(err.to_string().contains("Failed to clone repository"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum HourglassError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The clone collaborator exited non-zero; carries its combined output.
    #[error("Failed to clone repository: {0}")]
    Fetch(String),

    /// The log collaborator exited non-zero after a successful clone.
    #[error("Failed to get git log: {0}")]
    Log(String),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
