use {
    spoolog::{LoggerBuilder, RotationPolicy, RotationSize},
    std::thread,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = LoggerBuilder::new("./logs/sized.log")
        .policy(RotationPolicy::new(0, 5_000, RotationSize::MB(1))) // Rotate at 5000 lines or 1MB
        .file_mode(0o640) // Set file permissions to: owner rw, group r, others none
        .build()?;

    // Several producers share one writer; each keeps its own order.
    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 1..=5_000 {
                    spoolog::info!(
                        logger,
                        "worker {worker} entry #{i}: This is a sample log message that will contribute to file size"
                    );
                }
            })
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    logger.flush()?;
    Ok(())
}
