// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! rundiff: parse and compare unified test-run logs

use clap::Parser;
use rundiff_cli::Config;
use tracing::debug;

fn main() {
    let config = Config::parse();

    // Logs go to stderr so stdout stays clean for scripting.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "parsed command line");
    std::process::exit(rundiff_cli::run(&config));
}
