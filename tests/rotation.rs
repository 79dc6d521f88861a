use logprinter::RotationPolicy;
use logprinter::rotation::RollingFile;
use std::fs;
use tempfile::TempDir;

fn line(fill: char, len: usize) -> String {
    let mut s: String = std::iter::repeat_n(fill, len - 1).collect();
    s.push('\n');
    s
}

#[test]
fn backup_paths_append_an_index() {
    let path = RotationPolicy::backup_path("/var/log/app.log".as_ref(), 3);
    assert_eq!(path.to_string_lossy(), "/var/log/app.log.3");
}

#[test]
fn reaching_the_threshold_exactly_rolls() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let mut file = RollingFile::open(&path, RotationPolicy::new(100, 2), true).unwrap();

    file.write_line(&line('a', 50)).unwrap();
    assert_eq!(file.rotations(), 0);
    file.write_line(&line('b', 50)).unwrap();
    assert_eq!(file.rotations(), 1);
    assert_eq!(file.size(), 0);

    let backup = fs::read_to_string(tmp.path().join("app.log.1")).unwrap();
    assert_eq!(backup.len(), 100);
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn backups_shift_and_the_oldest_is_evicted() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let mut file = RollingFile::open(&path, RotationPolicy::new(10, 2), true).unwrap();

    for fill in ['1', '2', '3'] {
        file.write_line(&line(fill, 10)).unwrap();
    }
    file.flush().unwrap();

    assert_eq!(file.rotations(), 3);
    assert_eq!(fs::read_to_string(tmp.path().join("app.log.1")).unwrap(), line('3', 10));
    assert_eq!(fs::read_to_string(tmp.path().join("app.log.2")).unwrap(), line('2', 10));
    assert!(!tmp.path().join("app.log.3").exists());
}

#[test]
fn zero_backups_truncates_in_place() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let mut file = RollingFile::open(&path, RotationPolicy::new(10, 0), true).unwrap();

    file.write_line(&line('x', 10)).unwrap();
    file.write_line("tail\n").unwrap();
    file.flush().unwrap();

    assert_eq!(file.rotations(), 1);
    assert!(!tmp.path().join("app.log.1").exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "tail\n");
}

#[test]
fn oversized_record_rolls_after_every_write() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    let mut file = RollingFile::open(&path, RotationPolicy::new(8, 3), true).unwrap();

    file.write_line(&line('a', 20)).unwrap();
    file.write_line(&line('b', 20)).unwrap();

    assert_eq!(file.rotations(), 2);
    assert_eq!(fs::read_to_string(tmp.path().join("app.log.1")).unwrap(), line('b', 20));
    assert_eq!(fs::read_to_string(tmp.path().join("app.log.2")).unwrap(), line('a', 20));
}

#[test]
fn reopening_appends_and_counts_existing_bytes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("app.log");
    fs::write(&path, "previous run\n").unwrap();

    let mut file = RollingFile::open(&path, RotationPolicy::new(1024, 1), false).unwrap();
    assert_eq!(file.size(), 13);
    file.write_line("this run\n").unwrap();
    file.flush().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "previous run\nthis run\n");
}

#[test]
fn missing_directory_is_not_created() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing").join("app.log");
    assert!(RollingFile::open(&path, RotationPolicy::new(1024, 1), true).is_err());
    assert!(!tmp.path().join("missing").exists());
}
