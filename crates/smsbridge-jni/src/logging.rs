// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-wide tracing subscriber.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "info";

/// Directive of the filter installed by the first `init`.
static INSTALLED: OnceLock<String> = OnceLock::new();

/// Pick the filter: `env_directive` (from `RUST_LOG`) when it parses, then
/// the configured directive, then `info`. Blank directives are skipped.
pub fn build_filter(env_directive: Option<&str>, configured: &str) -> EnvFilter {
    [env_directive, Some(configured)]
        .into_iter()
        .flatten()
        .filter(|d| !d.trim().is_empty())
        .find_map(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_DIRECTIVE))
}

/// Install the `fmt` subscriber. Only the first call has any effect;
/// every call returns the directive that is actually in force.
pub fn init(configured: &str) -> &'static str {
    INSTALLED.get_or_init(|| {
        let env_directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = build_filter(env_directive.as_deref(), configured);
        let directive = filter.to_string();

        // Another subscriber may already be installed by the embedding app.
        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .try_init()
            .is_err()
        {
            tracing::debug!("global subscriber already set");
        }
        tracing::info!(filter = %directive, "smsbridge logging initialised");
        directive
    })
}
