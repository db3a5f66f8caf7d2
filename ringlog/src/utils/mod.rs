mod __test__;

/// Stable numeric id for the current thread, derived by hashing the opaque
/// `ThreadId`.
#[inline]
pub fn thread_id() -> u32 {
  use std::collections::hash_map::DefaultHasher;
  use std::hash::{Hash, Hasher};
  let mut hasher = DefaultHasher::new();
  std::thread::current().id().hash(&mut hasher);
  hasher.finish() as u32
}
