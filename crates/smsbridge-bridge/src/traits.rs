// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use smsbridge_core::error::Result;
use smsbridge_core::{Permission, PermissionState, ToastDuration};

/// Unified bridge that groups all native capabilities the SMS bridge needs.
///
/// `Send + Sync` so a single instance can back the process-wide channel.
pub trait PlatformBridge: NativeSms + NativePermissions + NativeToast + Send + Sync {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;
}

/// Hand a text message to the OS messaging facility.
pub trait NativeSms {
    /// Send `body` to `destination` as a single SMS.
    ///
    /// `Ok(())` means the OS accepted the request, not that the carrier
    /// delivered it. No sent/delivery callbacks are registered.
    fn send_text_message(&self, destination: &str, body: &str) -> Result<()>;
}

/// Runtime permission query and prompt.
pub trait NativePermissions {
    /// Current authorization state for `permission`.
    fn check_permission(&self, permission: Permission) -> Result<PermissionState>;

    /// Raise the OS permission prompt. Returns as soon as the prompt is
    /// scheduled; the user's answer arrives later through the host's
    /// permission-result callback, tagged with `request_code`.
    fn request_permission(&self, permission: Permission, request_code: i32) -> Result<()>;
}

/// Transient user-visible notification.
pub trait NativeToast {
    fn show_toast(&self, text: &str, duration: ToastDuration) -> Result<()>;
}
