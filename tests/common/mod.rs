use simplelog::{Config, LogLevelFilter, SimpleLogger};

/// Installs a plain logger so warnings from degenerate-geometry
/// substitution show up in test output. Repeated initialization from
/// multiple tests is fine, later attempts are ignored.
pub fn init_logging() {
    let _ = SimpleLogger::init(LogLevelFilter::Info, Config::default());
}
