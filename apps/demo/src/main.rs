use anyhow::Context;
use herald::{ConsoleHandler, DetailedFormatter, EventBus, ExcludeLevel, Level, Logger};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct JobFinished {
    value: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let logger = Arc::new(
        Logger::builder()
            .level(Level::Debug)
            .formatter(DetailedFormatter)
            .filter(ExcludeLevel::new(Level::Trace))
            .handler(ConsoleHandler::new())
            .build()
            .context("Critical: logger configuration is malformed")?,
    );

    let bus = EventBus::new();

    let sink = Arc::clone(&logger);
    let mut subscription = bus.subscribe("jobs", move |event: &JobFinished| {
        sink.info(format!("job finished: {}", event.value));
    });

    bus.publish("jobs", JobFinished { value: "abab".to_owned() })?;

    // Ten concurrent publishers against the single registration above.
    let workers: Vec<_> = (0..10u64)
        .map(|i| {
            let bus = bus.clone();
            std::thread::spawn(move || {
                bus.publish("jobs", JobFinished { value: format!("abab {}", i * i) })
            })
        })
        .collect();
    for worker in workers {
        worker.join().map_err(|_| anyhow::anyhow!("publisher thread panicked"))??;
    }

    logger.debug(format!("handlers registered on jobs: {}", bus.handler_count("jobs")));

    subscription.unsubscribe();
    let delivered = bus.publish("jobs", JobFinished { value: "xyz".to_owned() })?;
    logger.info(format!("deliveries after unsubscribe: {delivered}"));

    Ok(())
}
