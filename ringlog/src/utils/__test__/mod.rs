#[cfg(test)]
mod tests {
  use crate::utils::thread_id;

  #[test]
  fn test_stable_within_thread() {
    assert_eq!(thread_id(), thread_id());
  }

  #[test]
  fn test_differs_across_threads() {
    let here = thread_id();
    let there = std::thread::spawn(thread_id).join().unwrap();
    assert_ne!(here, there);
  }
}
