use herald_logger::{
    ExcludeLevel, Filter, Formatter, Level, Logger, LoggerError, MemoryHandler, Record,
};
use std::sync::Arc;

#[test]
fn test_level_gate() -> Result<(), LoggerError> {
    let sink = MemoryHandler::new();
    let logger = Logger::builder().level(Level::Warn).handler(sink.clone()).build()?;

    logger.debug("not this one");
    logger.info("nor this one");
    logger.warn("low disk space");
    logger.error("disk full");

    assert_eq!(sink.lines(), ["[WARN]: low disk space", "[ERROR]: disk full"]);
    Ok(())
}

#[test]
fn test_filter_vetoes_exact_level() -> Result<(), LoggerError> {
    let sink = MemoryHandler::new();
    let logger = Logger::builder()
        .level(Level::Debug)
        .filter(ExcludeLevel::new(Level::Info))
        .handler(sink.clone())
        .build()?;

    logger.info("suppressed");
    logger.debug("kept");

    assert_eq!(sink.lines(), ["[DEBUG]: kept"]);
    Ok(())
}

#[test]
fn test_custom_filter_vetoes_by_message() -> Result<(), LoggerError> {
    struct DropNoisy;

    impl Filter for DropNoisy {
        fn allows(&self, record: &Record) -> bool {
            !record.message.contains("heartbeat")
        }
    }

    let sink = MemoryHandler::new();
    let logger = Logger::builder().filter(DropNoisy).handler(sink.clone()).build()?;

    logger.info("heartbeat ok");
    logger.info("connection accepted");

    assert_eq!(sink.lines(), ["[INFO]: connection accepted"]);
    Ok(())
}

#[test]
fn test_every_handler_receives_every_record() -> Result<(), LoggerError> {
    let first = MemoryHandler::new();
    let second = MemoryHandler::new();
    let logger =
        Logger::builder().handler(first.clone()).handler(second.clone()).build()?;

    logger.info("shared line");

    assert_eq!(first.lines(), ["[INFO]: shared line"]);
    assert_eq!(second.lines(), first.lines());
    Ok(())
}

#[test]
fn test_custom_formatter_renders_once_for_all_handlers() -> Result<(), LoggerError> {
    struct Tagged;

    impl Formatter for Tagged {
        fn format(&self, record: &Record) -> String {
            format!("app {} {}", record.level, record.message)
        }
    }

    let sink = MemoryHandler::new();
    let logger = Logger::builder().formatter(Tagged).handler(sink.clone()).build()?;

    logger.error("boom");
    assert_eq!(sink.lines(), ["app ERROR boom"]);
    Ok(())
}

#[test]
fn test_record_ids_are_monotonic() -> Result<(), LoggerError> {
    struct IdOnly;

    impl Formatter for IdOnly {
        fn format(&self, record: &Record) -> String {
            record.id.to_string()
        }
    }

    let sink = MemoryHandler::new();
    let logger = Logger::builder().formatter(IdOnly).handler(sink.clone()).build()?;

    logger.info("a");
    logger.info("b");
    logger.info("c");

    let ids: Vec<u64> = sink.lines().iter().map(|line| line.parse().unwrap()).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]), "ids must increase: {ids:?}");
    Ok(())
}

#[test]
fn test_convenience_methods_map_to_levels() -> Result<(), LoggerError> {
    let sink = MemoryHandler::new();
    let logger = Logger::builder().level(Level::Trace).handler(sink.clone()).build()?;

    logger.error("e");
    logger.warn("w");
    logger.info("i");
    logger.debug("d");
    logger.trace("t");

    assert_eq!(
        sink.lines(),
        ["[ERROR]: e", "[WARN]: w", "[INFO]: i", "[DEBUG]: d", "[TRACE]: t"]
    );
    Ok(())
}

#[test]
fn test_logger_is_shareable_across_threads() -> Result<(), LoggerError> {
    let sink = MemoryHandler::new();
    let logger = Arc::new(Logger::builder().handler(sink.clone()).build()?);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..25 {
                    logger.info(format!("worker {worker} line {i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.len(), 100);
    Ok(())
}
