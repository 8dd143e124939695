use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

const DEFAULT_LOG_FILTER: &str = "warn,ghchat=info";
const DEFAULT_LOG_FILE_PATH: &str = "logs/ghchat.log";

// The non-blocking writer stops flushing once its guard drops.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum LogOutput {
    Stderr,
    File(PathBuf),
    Both(PathBuf),
}

/// Logging settings from LOG_FORMAT, LOG_OUTPUT, and LOG_FILE_PATH.
/// Unknown values fall back to the defaults instead of failing startup.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Settings {
    format: LogFormat,
    output: LogOutput,
}

impl Settings {
    fn from_env() -> Self {
        Self::from_vars(
            env::var("LOG_FORMAT").ok().as_deref(),
            env::var("LOG_OUTPUT").ok().as_deref(),
            env::var("LOG_FILE_PATH").ok().as_deref(),
        )
    }

    fn from_vars(format: Option<&str>, output: Option<&str>, file_path: Option<&str>) -> Self {
        let format = match format.unwrap_or("pretty").trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let path = file_path
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_PATH));

        let output = match output.unwrap_or("stderr").trim().to_ascii_lowercase().as_str() {
            "file" => LogOutput::File(path),
            "both" => LogOutput::Both(path),
            _ => LogOutput::Stderr,
        };

        Self { format, output }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn try_init(format: LogFormat, writer: BoxMakeWriter) -> InitResult {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .try_init(),
    }
}

fn file_writer(path: &Path) -> std::io::Result<(non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| std::ffi::OsStr::new("ghchat.log"));

    fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

fn init_with_file(format: LogFormat, path: &Path, include_stderr: bool) -> InitResult {
    match file_writer(path) {
        Ok((writer, guard)) => {
            let writer = if include_stderr {
                BoxMakeWriter::new(std::io::stderr.and(writer))
            } else {
                BoxMakeWriter::new(writer)
            };

            let result = try_init(format, writer);
            if result.is_ok() {
                let _ = LOG_GUARD.set(guard);
            }
            result
        }
        Err(err) => {
            let (mode, fallback) = if include_stderr {
                ("both", "using stderr only")
            } else {
                ("file", "using stderr instead")
            };
            eprintln!(
                "ghchat: failed to initialize LOG_OUTPUT={} at '{}': {}; {}",
                mode,
                path.display(),
                err,
                fallback
            );
            try_init(format, BoxMakeWriter::new(std::io::stderr))
        }
    }
}

pub fn init() {
    let settings = Settings::from_env();

    let result = match &settings.output {
        LogOutput::Stderr => try_init(settings.format, BoxMakeWriter::new(std::io::stderr)),
        LogOutput::File(path) => init_with_file(settings.format, path, false),
        LogOutput::Both(path) => init_with_file(settings.format, path, true),
    };

    // A second init attempt in the same process is not an error worth failing over.
    let _ = result;
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{DEFAULT_LOG_FILE_PATH, LogFormat, LogOutput, Settings};

    #[test]
    fn settings_default_to_pretty_stderr() {
        let settings = Settings::from_vars(None, None, None);
        assert_eq!(settings.format, LogFormat::Pretty);
        assert_eq!(settings.output, LogOutput::Stderr);
    }

    #[test]
    fn settings_accept_json_format() {
        assert_eq!(
            Settings::from_vars(Some(" JSON "), None, None).format,
            LogFormat::Json
        );
    }

    #[test]
    fn settings_fall_back_for_unknown_values() {
        let settings = Settings::from_vars(Some("unknown"), Some("unknown"), None);
        assert_eq!(settings.format, LogFormat::Pretty);
        assert_eq!(settings.output, LogOutput::Stderr);
    }

    #[test]
    fn settings_resolve_file_outputs_with_default_path() {
        let settings = Settings::from_vars(None, Some("file"), None);
        assert_eq!(
            settings.output,
            LogOutput::File(PathBuf::from(DEFAULT_LOG_FILE_PATH))
        );

        let settings = Settings::from_vars(None, Some(" BOTH "), Some("  "));
        assert_eq!(
            settings.output,
            LogOutput::Both(PathBuf::from(DEFAULT_LOG_FILE_PATH))
        );
    }

    #[test]
    fn settings_preserve_explicit_file_path() {
        let settings = Settings::from_vars(None, Some("file"), Some("custom/ghchat.log"));
        assert_eq!(
            settings.output,
            LogOutput::File(PathBuf::from("custom/ghchat.log"))
        );
    }
}
