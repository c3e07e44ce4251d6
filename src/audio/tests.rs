use std::io;
use std::path::PathBuf;

use super::BackendError;

#[test]
fn backend_errors_name_the_file_and_cause() {
    let err = BackendError::Open {
        path: PathBuf::from("/music/a.mp3"),
        source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
    };
    assert_eq!(err.to_string(), "failed to open /music/a.mp3: no such file");
    assert!(std::error::Error::source(&err).is_some());

    let err = BackendError::Decode {
        path: PathBuf::from("corrupt.mp3"),
        message: "unrecognized format".into(),
    };
    assert_eq!(
        err.to_string(),
        "unsupported or corrupt audio in corrupt.mp3: unrecognized format"
    );
}
