#[cfg(test)]
mod tests {
  use crate::level::Level;

  #[test]
  fn test_ordering_low_is_severe() {
    assert!(Level::Fatal < Level::Error);
    assert!(Level::Error < Level::Warn);
    assert!(Level::Warn < Level::Info);
    assert!(Level::Info < Level::Debug);
    assert!(Level::Debug < Level::Trace);
    assert_eq!(Level::Fatal as u8, 1);
    assert_eq!(Level::Trace as u8, 6);
  }

  #[test]
  fn test_tags() {
    assert_eq!(Level::Fatal.tag(), "[FATAL]");
    assert_eq!(Level::Info.tag(), "[INFO]");
    assert_eq!(Level::Trace.tag(), "[TRACE]");
  }

  #[test]
  fn test_clamp_from() {
    assert_eq!(Level::clamp_from(0), Level::Fatal);
    assert_eq!(Level::clamp_from(1), Level::Fatal);
    assert_eq!(Level::clamp_from(4), Level::Info);
    assert_eq!(Level::clamp_from(6), Level::Trace);
    assert_eq!(Level::clamp_from(200), Level::Trace);
  }

  #[test]
  fn test_from_tracing() {
    assert_eq!(Level::from_tracing(&tracing::Level::ERROR), Level::Error);
    assert_eq!(Level::from_tracing(&tracing::Level::WARN), Level::Warn);
    assert_eq!(Level::from_tracing(&tracing::Level::INFO), Level::Info);
    assert_eq!(Level::from_tracing(&tracing::Level::DEBUG), Level::Debug);
    assert_eq!(Level::from_tracing(&tracing::Level::TRACE), Level::Trace);
  }

  #[test]
  fn test_serde_roundtrip() {
    let json = serde_json::to_string(&Level::Warn).unwrap();
    assert_eq!(json, "\"warn\"");
    let back: Level = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Level::Warn);
  }
}
