use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter, e.g. `TYPETEST_LOG=debug`.
pub const LOG_ENV: &str = "TYPETEST_LOG";

/// Routes `log` output to `path`. The terminal is in raw mode while the test
/// runs, so nothing may be written to stderr.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(io::Error::other)
}
