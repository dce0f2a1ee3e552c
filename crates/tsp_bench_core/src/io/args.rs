use std::{env, path::PathBuf};

use log::LevelFilter;

use crate::{Error, Result};

/// Shared command line of the solver binaries: positional instance and
/// output paths, optional CSV sinks, logging switches.
#[derive(Clone, Debug)]
pub struct RunArgs {
    /// TSPLIB instance to solve.
    pub tsp_path: PathBuf,
    /// Tour result file; its `_coordinates.txt` sibling lands next to it.
    pub output_path: PathBuf,
    /// Optional benchmark CSV, appended to.
    pub csv_path: Option<PathBuf>,
    /// Optional per-phase analysis CSV, appended to.
    pub analysis_csv_path: Option<PathBuf>,
    pub log_level: LogLevel,
    pub log_timestamp: bool,
    /// Log destination; `None` means stderr.
    pub log_output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!(
                "Invalid value for --log-level: {value}"
            ))),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

impl RunArgs {
    pub fn from_env() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positional: Vec<String> = Vec::new();
        let mut log_level = LogLevel::Info;
        let mut log_timestamp = false;
        let mut log_output = None;

        let mut args = args.into_iter().map(|arg| arg.as_ref().to_owned());
        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw) = arg.strip_prefix("--") else {
                positional.push(arg);
                continue;
            };
            let (name, inline) = match raw.split_once('=') {
                Some((name, value)) => (name, Some(value.to_owned())),
                None => (raw, None),
            };

            match name {
                "log-level" => {
                    let value = take_value(name, inline, &mut args)?;
                    log_level = LogLevel::parse(&value)?;
                }
                "log-output" => {
                    let value = take_value(name, inline, &mut args)?;
                    log_output = Some(PathBuf::from(value));
                }
                "log-timestamp" => {
                    if inline.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    log_timestamp = true;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        let mut positional = positional.into_iter();
        let (Some(tsp_path), Some(output_path)) = (positional.next(), positional.next()) else {
            return Err(Error::invalid_input(Self::usage()));
        };
        let csv_path = positional.next().map(PathBuf::from);
        let analysis_csv_path = positional.next().map(PathBuf::from);
        if let Some(extra) = positional.next() {
            return Err(Error::invalid_input(format!(
                "Unexpected argument: {extra}\n\n{}",
                Self::usage()
            )));
        }

        Ok(Self {
            tsp_path: PathBuf::from(tsp_path),
            output_path: PathBuf::from(output_path),
            csv_path,
            analysis_csv_path,
            log_level,
            log_timestamp,
            log_output,
        })
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  <solver> <instance.tsp> <tour-out.txt> [benchmark.csv] [analysis.csv] [options]\n",
            "\n",
            "Options:\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-timestamp\n",
            "  --log-output <path>\n",
            "  --help\n",
        )
    }
}

fn take_value<I>(name: &str, inline: Option<String>, args: &mut I) -> Result<String>
where
    I: Iterator<Item = String>,
{
    inline
        .or_else(|| args.next())
        .ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}
