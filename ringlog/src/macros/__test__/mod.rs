#[cfg(test)]
mod tests {
  // The macros must expand and stay silent whether or not the global logger
  // exists; other tests own the global, so nothing about it is asserted here.
  #[test]
  fn test_macros_expand_without_panicking() {
    crate::log_trace!("trace {}", 1);
    crate::log_debug!("debug {}", 2);
    crate::log_info!("info {}", 3);
    crate::log_normal!("normal {}", 4);
    crate::log_warn!("warn {}", 5);
    crate::log_error!("error {}", 6);
    crate::log_fatal!("fatal {}", 7);

    crate::trace!("alias");
    crate::debug!("alias");
    crate::info!("alias");
    crate::normal!("alias");
    crate::warn!("alias");
    crate::error!("alias");
    crate::fatal!("alias");
  }
}
