use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the encoded VEX document is written.
pub trait OutputPresenter {
    /// Presents the encoded VEX document to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination file exists and overwriting was not allowed
    fn present(&self, content: &str) -> Result<()>;
}
