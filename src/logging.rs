// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV_VAR: &str = "POCKETBOOK_LOG";

/// Sends log output to stderr so it never mixes with table or JSON output.
///
/// The level comes from `POCKETBOOK_LOG` (e.g. `debug`, `pocketbook=trace`),
/// defaulting to `warn`.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(stderr_log).try_init();
}
