use thiserror::Error;

/// Errors from logger initialization. An unusable log directory is not one
/// of them: the sink falls back to `/dev/null` and init still succeeds.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("logger already initialized")]
  AlreadyInitialized,
}
