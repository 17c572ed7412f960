#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::env;

use cli::{ExitReporter, RuntimeConfig, SystemPlatform};

fn main() {
    let config = RuntimeConfig::from_env();
    logging::init_tracing(config.log());

    let reporter = ExitReporter::new(config.status_path());
    let mut platform = SystemPlatform::new();
    let code = cli::run(env::args_os(), &config, &mut platform);
    reporter.exit(code)
}
