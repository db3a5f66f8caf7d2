#[cfg(test)]
mod tests {
  use std::fs;

  use crate::cell::CellBuffer;
  use crate::clock::DayStamp;
  use crate::sink::{prepare_dir, FileSink};

  const JAN_9: DayStamp = DayStamp {
    year: 2024,
    mon: 1,
    day: 9,
  };
  const JAN_10: DayStamp = DayStamp {
    year: 2024,
    mon: 1,
    day: 10,
  };

  fn cell_with(bytes: &[u8]) -> CellBuffer {
    let mut cell = CellBuffer::new(1024);
    cell.append(bytes);
    cell
  }

  fn primary_name(prog: &str, stamp: DayStamp) -> String {
    format!(
      "{}.{:04}{:02}{:02}.{}.log",
      prog,
      stamp.year,
      stamp.mon,
      stamp.day,
      std::process::id()
    )
  }

  #[test]
  fn test_first_select_opens_primary() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::new(dir.path(), "prog", true);

    assert!(sink.select(JAN_9));
    assert_eq!(sink.rotation(), 1);

    sink.write_cell(&cell_with(b"hello\n"));
    let path = dir.path().join(primary_name("prog", JAN_9));
    assert_eq!(fs::read(&path).unwrap(), b"hello\n");

    // same day, below the threshold: the handle is kept
    assert!(sink.select(JAN_9));
    sink.write_cell(&cell_with(b"again\n"));
    assert_eq!(fs::read(&path).unwrap(), b"hello\nagain\n");
  }

  #[test]
  fn test_day_rollover_opens_new_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::new(dir.path(), "prog", true);

    assert!(sink.select(JAN_9));
    sink.write_cell(&cell_with(b"day one\n"));

    assert!(sink.select(JAN_10));
    assert_eq!(sink.rotation(), 1);
    sink.write_cell(&cell_with(b"day two\n"));

    let old = dir.path().join(primary_name("prog", JAN_9));
    let new = dir.path().join(primary_name("prog", JAN_10));
    assert_eq!(fs::read(&old).unwrap(), b"day one\n");
    assert_eq!(fs::read(&new).unwrap(), b"day two\n");
  }

  #[test]
  fn test_size_rotation_shifts_older_files_up() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::new(dir.path(), "prog", true).with_rotate_limit(10);
    let primary = dir.path().join(primary_name("prog", JAN_9));

    assert!(sink.select(JAN_9));
    sink.write_cell(&cell_with(b"first file bytes\n")); // 17 bytes, over the limit

    // threshold crossed: primary becomes .1, a fresh primary is opened
    assert!(sink.select(JAN_9));
    assert_eq!(sink.rotation(), 2);
    sink.write_cell(&cell_with(b"second file bytes\n"));

    assert!(sink.select(JAN_9));
    assert_eq!(sink.rotation(), 3);
    sink.write_cell(&cell_with(b"third\n"));

    let dot1 = dir.path().join(format!("{}.1", primary_name("prog", JAN_9)));
    let dot2 = dir.path().join(format!("{}.2", primary_name("prog", JAN_9)));
    assert_eq!(fs::read(&primary).unwrap(), b"third\n");
    assert_eq!(fs::read(&dot1).unwrap(), b"second file bytes\n");
    assert_eq!(fs::read(&dot2).unwrap(), b"first file bytes\n");
  }

  #[test]
  fn test_post_rotation_primary_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::new(dir.path(), "prog", true).with_rotate_limit(4);
    let primary = dir.path().join(primary_name("prog", JAN_9));

    assert!(sink.select(JAN_9));
    sink.write_cell(&cell_with(b"over the limit\n"));
    assert!(sink.select(JAN_9));
    assert_eq!(fs::read(&primary).unwrap(), b"");
  }

  #[test]
  fn test_env_not_ok_diverts_to_dev_null() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FileSink::new(dir.path(), "prog", false);

    assert!(sink.select(JAN_9));
    sink.write_cell(&cell_with(b"discarded\n"));

    // nothing lands in the directory
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
  }

  #[test]
  fn test_prepare_dir_creates_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("logs").join("app");
    assert!(prepare_dir(&nested));
    assert!(nested.is_dir());
    // probe file was removed again
    assert_eq!(fs::read_dir(&nested).unwrap().count(), 0);
  }

  #[test]
  fn test_prepare_dir_rejects_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("not-a-dir");
    fs::write(&file_path, b"x").unwrap();
    assert!(!prepare_dir(&file_path));
  }
}
