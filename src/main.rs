use par_trace::cli;

fn main() {
    // Parse arguments first so --help and usage errors stay out of the log
    let options = cli::process_cli();
    // CLI --log-level takes precedence, then RUST_LOG, then DEBUG_LEVEL
    par_trace::debug::init_log_bridge(options.log_level);

    log::info!("Starting par-trace {}", par_trace::VERSION);

    if let Err(e) = cli::run(options.command) {
        log::error!("{e:#}");
        eprintln!("par-trace: error: {e:#}");
        std::process::exit(1);
    }
}
