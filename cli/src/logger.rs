use std::io::Write;

use log::{Level, LevelFilter};

/// Install the stderr logger: warnings by default, `-v` for info, `-vv` for debug.
/// `RUST_LOG` still overrides the level per module.
///
/// Lines read `[target] message`, where `target` is the last path segment of
/// the logging module.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let target = record.target().rsplit("::").next().unwrap_or("fieldmesh");
            match record.level() {
                Level::Error => writeln!(buf, "[{target}] error: {}", record.args()),
                Level::Warn => writeln!(buf, "[{target}] warning: {}", record.args()),
                _ => writeln!(buf, "[{target}] {}", record.args()),
            }
        })
        .init();
}
