/// Configuration error variants.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// The output directory names something that exists but is not a
    /// directory.
    #[error("[export.output_dir] {0} exists and is not a directory")]
    OutputDirNotADirectory(String),
}
