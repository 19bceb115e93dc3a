// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the SMS bridge.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SmsBridgeError};

/// Android's `PackageManager.PERMISSION_GRANTED`.
pub const PERMISSION_GRANTED: i32 = 0;

/// Identifier attached to one send attempt so its log lines can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single validated SMS send request.
///
/// Both fields are guaranteed non-empty. Lives only for the duration of
/// one `sendSms` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    phone_number: String,
    message: String,
}

impl SendRequest {
    /// Build a request from raw, possibly absent, channel arguments.
    ///
    /// Fails with [`SmsBridgeError::InvalidInput`] if either value is
    /// missing or empty. Whitespace is not trimmed.
    pub fn from_args(phone_number: Option<&str>, message: Option<&str>) -> Result<Self> {
        match (phone_number, message) {
            (Some(phone), Some(body)) if !phone.is_empty() && !body.is_empty() => Ok(Self {
                phone_number: phone.to_owned(),
                message: body.to_owned(),
            }),
            _ => Err(SmsBridgeError::InvalidInput),
        }
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Phone number with everything but the last four characters masked,
    /// suitable for log output.
    pub fn masked_phone_number(&self) -> String {
        mask_phone_number(&self.phone_number)
    }
}

/// Mask all but the trailing four characters of a phone number.
pub fn mask_phone_number(phone: &str) -> String {
    let count = phone.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    phone
        .chars()
        .enumerate()
        .map(|(i, c)| if i < count - 4 { '*' } else { c })
        .collect()
}

/// Runtime permissions the bridge knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    SendSms,
}

impl Permission {
    /// Fully qualified Android permission name.
    pub fn android_name(self) -> &'static str {
        match self {
            Permission::SendSms => "android.permission.SEND_SMS",
        }
    }
}

/// Whether the OS currently authorizes a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionState {
    Granted,
    Denied,
}

impl PermissionState {
    /// Map an Android `PackageManager` grant result onto a state.
    /// Any value other than `PERMISSION_GRANTED` counts as denied.
    pub fn from_grant_result(result: i32) -> Self {
        if result == PERMISSION_GRANTED {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }

    pub fn is_granted(self) -> bool {
        self == PermissionState::Granted
    }
}

/// How long a transient notification stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    #[default]
    Short,
    Long,
}

impl ToastDuration {
    /// Android `Toast.LENGTH_SHORT` / `Toast.LENGTH_LONG`.
    pub fn android_length(self) -> i32 {
        match self {
            ToastDuration::Short => 0,
            ToastDuration::Long => 1,
        }
    }
}
