use {
    spoolog::{LoggerBuilder, RotationPolicy, RotationSize, TimeZone},
    tracing_subscriber::util::SubscriberInitExt,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = LoggerBuilder::new("./logs/tracing.log")
        .policy(RotationPolicy::new(1, 0, RotationSize::MB(10)))
        .time_zone(TimeZone::Local)
        .build()?;
    tracing_subscriber::fmt()
        .with_writer(logger.clone())
        .with_ansi(false)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .finish()
        .try_init()?;

    tracing::info!("This is an info message");
    tracing::warn!("This is a warning message");
    tracing::error!("This is an error message");

    logger.flush()?;
    Ok(())
}
