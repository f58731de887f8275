use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::{
    fs,
    io::{stderr, IsTerminal},
    path::PathBuf,
};
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::debug_fn},
    prelude::*,
    registry, EnvFilter,
};

use crate::settings::consts::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, DEFAULT_LOG_LEVEL, LOG_FILE,
};

/// HTTP stack crates only log at `warn` on the console, whatever the level
const QUIET_DEPENDENCIES: [&str; 3] = ["hyper_util=warn", "reqwest=warn", "wiremock=warn"];

fn console_filter(debug: bool) -> EnvFilter {
    let mut filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if debug => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new(DEFAULT_LOG_LEVEL),
    };
    for directive in QUIET_DEPENDENCIES {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Console logs on stderr plus a JSON log file in the data directory.
///
/// Returns the path of the log file.
pub fn init_logger(debug: bool) -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .ok_or_else(|| anyhow!("Could not determine project directories"))?;

    let directory = project_dirs.data_dir();
    fs::create_dir_all(directory)?;

    let file_appender = rolling::never(directory, LOG_FILE);

    let console_layer = fmt::layer()
        .with_writer(stderr)
        .with_ansi(IsTerminal::is_terminal(&stderr()))
        .with_level(true)
        .without_time()
        .compact()
        .fmt_fields({
            debug_fn(move |writer, field, value| {
                if field.name() == "message" {
                    write!(writer, "{:?}", value)?;
                }
                Ok(())
            })
        })
        .with_filter(console_filter(debug));

    let json_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_target(true)
        .with_level(true)
        .flatten_event(true)
        .with_filter(LevelFilter::DEBUG);

    registry().with(console_layer).with(json_layer).init();

    Ok(directory.join(LOG_FILE))
}
