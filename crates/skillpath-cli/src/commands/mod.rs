pub mod config;
pub mod courses;
pub mod job;
pub mod path;
pub mod quiz;
pub mod roadmap;
pub mod session;
pub mod topics;

/// Runtime for the simulated asynchronous operations.
pub(crate) fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread().enable_time().build()
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
