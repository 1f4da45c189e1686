use spoolog::{LoggerBuilder, RotationPolicy, RotationSize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = LoggerBuilder::new("./logs/logger.log")
        .policy(RotationPolicy::new(0, 0, RotationSize::KB(256)))
        .build()?;

    spoolog::info!(logger, "This is an info message");
    spoolog::warning!(logger, "This is a warning message");
    spoolog::error!(logger, "This is an error message");

    logger.flush()?;
    Ok(())
}
