use std::io;
use std::sync::Once;

use tracing::Level;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;

static INIT: Once = Once::new();

/// Process-wide tracing setup. The first call wins; later calls are no-ops
/// so library tests can initialize logging without stepping on each other.
#[derive(Debug, Clone, Default)]
pub struct TracingFactory {
    options: TracingFactoryOptions,
}

#[derive(Debug, Clone)]
pub struct TracingFactoryOptions {
    debug: bool,

    output_type: OutputType,

    log_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub enum OutputType {
    Stdout,

    /// Daily-rolling log file, mirrored to stdout.
    File,
}

impl TracingFactory {
    pub fn init_log(debug: bool) -> Self {
        TracingFactory::init_log_with_options(TracingFactoryOptions::new_with_debug(debug))
    }

    pub fn init_log_with_options(opts: TracingFactoryOptions) -> Self {
        let level = if opts.debug { Level::DEBUG } else { Level::INFO };

        INIT.call_once(|| match &opts.output_type {
            OutputType::Stdout => {
                let _ = tracing_subscriber::fmt()
                    .with_max_level(level)
                    .with_target(false)
                    .try_init();
            }
            OutputType::File => {
                let dir = opts
                    .log_dir
                    .clone()
                    .unwrap_or_else(|| String::from("/tmp/binrelay/logs"));
                let file_appender = rolling::daily(dir, "binrelay.log");
                let merge = file_appender.and(io::stdout);

                let _ = tracing_subscriber::fmt()
                    .with_max_level(level)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(merge)
                    .try_init();
            }
        });

        TracingFactory { options: opts }
    }

    pub fn get_log_dir(&self) -> &str {
        self.options.get_log_dir()
    }
}

impl Default for TracingFactoryOptions {
    fn default() -> Self {
        TracingFactoryOptions::new_with_debug(false)
    }
}

impl TracingFactoryOptions {
    pub fn new_with_debug(debug: bool) -> Self {
        TracingFactoryOptions::new(debug, OutputType::Stdout, None)
    }

    pub fn new(debug: bool, output_type: OutputType, log_dir: Option<String>) -> Self {
        TracingFactoryOptions {
            debug,
            output_type,
            log_dir,
        }
    }

    pub fn get_log_dir(&self) -> &str {
        match self.log_dir.as_ref() {
            None => "",
            Some(dir) => dir.as_str(),
        }
    }
}

#[cfg(test)]
mod test {
    use tracing::{debug, info};

    use crate::log::tracing_factory::TracingFactory;

    #[test]
    fn test_init_is_idempotent() {
        TracingFactory::init_log(true);
        TracingFactory::init_log(false);

        debug!("tracing factory test: {:?}", "debug");
        info!("tracing factory test: {:?}", "info");
    }
}
