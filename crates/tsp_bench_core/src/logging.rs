use std::{fs::File, io::Write, path::Path};

use env_logger::{Builder, Target, fmt::Formatter};
use log::{Level, LevelFilter};

use crate::Result;

/// Installs the process-wide logger. Messages go to stderr unless an
/// output path is given, so tour files on stdout-adjacent paths and
/// CSV appends stay clean.
pub fn init_logger(level: LevelFilter, timestamp: bool, output: Option<&Path>) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf: &mut Formatter, record| {
            if timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        });

    if let Some(log_path) = output {
        let log_file = File::create(log_path).map_err(|e| {
            crate::Error::other(format!(
                "failed to create log output file {}: {e}",
                log_path.display()
            ))
        })?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| crate::Error::other(format!("logger init failed: {e}")))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
