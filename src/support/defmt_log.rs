use log::{Level, LevelFilter, Log, Metadata, Record};

/// Routes `log` records of the engine crate into the defmt stream.
struct DefmtLog;

impl Log for DefmtLog {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let msg = defmt::Display2Format(record.args());
        match record.level() {
            Level::Error => defmt::error!("{}: {}", record.target(), msg),
            Level::Warn => defmt::warn!("{}: {}", record.target(), msg),
            Level::Info => defmt::info!("{}: {}", record.target(), msg),
            Level::Debug => defmt::debug!("{}: {}", record.target(), msg),
            Level::Trace => defmt::trace!("{}: {}", record.target(), msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: DefmtLog = DefmtLog;

pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}
