use log::LevelFilter;

/// Log level for a run: `Debug` when verbose, `Info` otherwise so warnings still show.
pub fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub fn init_logger(verbose: bool) {
    env_logger::Builder::new().filter_level(level_filter(verbose)).init();
}
