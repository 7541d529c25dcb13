use std::io;

use astra::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("missing 'package' section".to_string());
    assert_eq!(err.to_string(), "Configuration error: missing 'package' section.");

    let err = Error::MissingSectionError {
        document: "README.md".to_string(),
        section: "## Change Log".to_string(),
    };
    assert_eq!(err.to_string(), "Missing required section '## Change Log' in 'README.md'.");

    let err = Error::DownloadStatusError { url: "https://x/a.zip".to_string(), status: 404 };
    assert_eq!(
        err.to_string(),
        "Failed to download 'https://x/a.zip': server responded with 404."
    );
}

#[test]
fn test_read_error_names_path() {
    let err = Error::ReadError {
        path: "scripts/Effect.in.anm2".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "not found"),
    };
    assert!(err.to_string().starts_with("Failed to read 'scripts/Effect.in.anm2'"));
}
