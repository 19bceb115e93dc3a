// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! smsbridge — Native platform bridge abstractions.
//!
//! Defines the capability traits the messaging bridge depends on (SMS
//! dispatch, runtime permissions, toasts) and selects the implementation
//! for the target operating system. Callers receive the bridge as a value
//! and pass it in; nothing here is reached through global state except the
//! JNI handles owned by the Android module.

pub mod exception;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

/// Retrieves the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: `jni` calls into ART against the attached Activity.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: no SMS radio, every capability reports unavailable.
        Box::new(stub::StubBridge)
    }
}
