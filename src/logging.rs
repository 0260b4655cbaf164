use tracing::Level;

/// Sends debug traces to stderr. Without `--debug` nothing is installed and
/// the `tracing` macros stay silent.
pub fn init(debug: bool) {
    if !debug {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .try_init();
}
