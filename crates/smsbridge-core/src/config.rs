// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration, supplied by the host as JSON at attach time.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmsBridgeError};
use crate::types::ToastDuration;

/// Largest request code Android accepts for `requestPermissions`.
const MAX_REQUEST_CODE: i32 = 0xFFFF;

/// Settings for one bridge instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Method channel name registered by the host.
    pub channel_name: String,
    /// Method name that triggers a send.
    pub send_method: String,
    /// Request code passed to the OS permission prompt.
    pub permission_request_code: i32,
    /// Duration for every toast the bridge shows.
    pub toast_duration: ToastDuration,
    /// `tracing` filter directive used when logging is installed.
    pub log_filter: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: "com.yourpackage/sms".into(),
            send_method: "sendSms".into(),
            permission_request_code: 1,
            toast_duration: ToastDuration::Short,
            log_filter: "info".into(),
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON configuration. Blank input yields the defaults;
    /// missing fields fall back to their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_name.is_empty() {
            return Err(SmsBridgeError::Config("channelName must not be empty".into()));
        }
        if self.send_method.is_empty() {
            return Err(SmsBridgeError::Config("sendMethod must not be empty".into()));
        }
        if !(0..=MAX_REQUEST_CODE).contains(&self.permission_request_code) {
            return Err(SmsBridgeError::Config(format!(
                "permissionRequestCode {} outside 0..={MAX_REQUEST_CODE}",
                self.permission_request_code
            )));
        }
        Ok(())
    }
}
