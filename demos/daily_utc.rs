use spoolog::{LoggerBuilder, RotationPolicy, RotationSize, Severity, TimeZone};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = LoggerBuilder::new("./logs/daily.log")
        .policy(RotationPolicy::new(1, 0, RotationSize::Bytes(0)))
        .time_zone(TimeZone::UTC) // Use UTC for consistent timing across different regions
        .level(Severity::Info)
        .console(true)
        .build()?;

    // These logs will be rotated daily at UTC midnight
    spoolog::info!(logger, "System startup - UTC timestamp will be used for rotation");
    spoolog::debug!(logger, "Filtered out below Info");
    spoolog::info!(logger, "Server listening on port {}", 8080);

    logger.flush()?;
    Ok(())
}
