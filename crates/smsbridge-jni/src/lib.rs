// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// smsbridge — shared library loaded by the Android host.
//
// The Kotlin side registers the method channel and forwards each call, and
// each permission answer, into the exports below.

pub mod logging;

#[cfg(target_os = "android")]
mod exports;
