use herald_logger::{DetailedFormatter, FileHandler, Level, Logger, LoggerError};
use std::fs;

#[test]
fn test_file_handler_appends_formatted_lines() -> Result<(), LoggerError> {
    let tmp_dir = tempfile::tempdir().map_err(|source| LoggerError::Io {
        source,
        context: Some("creating temp dir".into()),
    })?;
    let log_path = tmp_dir.path().join("app.log");

    let logger = Logger::builder()
        .level(Level::Debug)
        .handler(FileHandler::create(&log_path)?)
        .build()?;

    logger.info("service started");
    logger.debug("cache warmed");
    drop(logger);

    let contents = fs::read_to_string(&log_path).map_err(|source| LoggerError::Io {
        source,
        context: Some("reading log file".into()),
    })?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, ["[INFO]: service started", "[DEBUG]: cache warmed"]);
    Ok(())
}

#[test]
fn test_detailed_formatter_prefixes_id_and_level() -> Result<(), LoggerError> {
    let tmp_dir = tempfile::tempdir().map_err(|source| LoggerError::Io {
        source,
        context: Some("creating temp dir".into()),
    })?;
    let log_path = tmp_dir.path().join("detailed.log");

    let logger = Logger::builder()
        .formatter(DetailedFormatter)
        .handler(FileHandler::create(&log_path)?)
        .build()?;

    logger.warn("queue depth rising");

    let contents = fs::read_to_string(&log_path).map_err(|source| LoggerError::Io {
        source,
        context: Some("reading log file".into()),
    })?;
    let line = contents.lines().next().expect("one line written");
    assert!(line.starts_with("(1) "), "id prefix missing: {line}");
    assert!(line.contains("[WARN]: queue depth rising"), "payload missing: {line}");
    Ok(())
}

#[test]
fn test_create_in_missing_directory_is_reported() {
    let err = FileHandler::create("/definitely/not/a/dir/app.log").unwrap_err();
    assert!(matches!(err, LoggerError::Io { .. }));
    assert!(err.to_string().contains("opening"), "context missing: {err}");
}
