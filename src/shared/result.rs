/// Result alias used throughout vexy; errors are carried as `anyhow::Error`
/// so adapters can attach context while `VexError` stays downcastable.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
