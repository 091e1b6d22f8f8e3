//! Basic usage example for the logger and the global console bridge

use tapline::logger::format;
use tapline::prelude::*;

fn main() -> Result<()> {
    println!("=== Tapline Console Tap Example ===\n");

    // Build a logger: JSON lines on stdout, plain errors on stderr
    println!("1. Building the logger...");
    let writes = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = std::sync::Arc::clone(&writes);
    let logger = Logger::new(
        LoggerOptions::default()
            .with_formatter(format::json_format)
            .with_stderr(SinkSpec::Stderr)
            .with_after_write(move || {
                counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            }),
    )?;
    println!("   ✓ Logger ready");

    println!("\n2. Writing through the leveled methods...");
    logger.info(format_args!("service starting"));
    logger.table(format_args!("rows=3 cols=2"));
    logger.dir(format_args!("settings={{format: json}}"));
    logger.error(format_args!("sample failure, routed to stderr"));

    println!("\n3. Installing the global console bridge...");
    replace_global_console(logger.clone())?;
    println!("   ✓ log macros now route through the logger");

    log::info!("hello from the log facade");
    log::warn!("warnings route to the error sink");
    log::debug!("debug maps to the plain log level");

    println!(
        "\n4. Write hooks observed {} lines",
        writes.load(std::sync::atomic::Ordering::Relaxed)
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
