// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Sends and prompts return `PlatformUnavailable`; the permission query
// reports `Denied` so callers see the same flow as an unauthorized device.

use smsbridge_core::error::{Result, SmsBridgeError};
use smsbridge_core::{Permission, PermissionState, ToastDuration};

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeSms for StubBridge {
    fn send_text_message(&self, _destination: &str, _body: &str) -> Result<()> {
        tracing::warn!("NativeSms::send_text_message called on stub bridge");
        Err(SmsBridgeError::PlatformUnavailable)
    }
}

impl NativePermissions for StubBridge {
    fn check_permission(&self, permission: Permission) -> Result<PermissionState> {
        tracing::debug!(?permission, "NativePermissions::check_permission on stub bridge");
        Ok(PermissionState::Denied)
    }

    fn request_permission(&self, _permission: Permission, _request_code: i32) -> Result<()> {
        tracing::warn!("NativePermissions::request_permission called on stub bridge");
        Err(SmsBridgeError::PlatformUnavailable)
    }
}

impl NativeToast for StubBridge {
    fn show_toast(&self, text: &str, _duration: ToastDuration) -> Result<()> {
        tracing::warn!(text, "NativeToast::show_toast called on stub bridge");
        Err(SmsBridgeError::PlatformUnavailable)
    }
}
