// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The messaging bridge: one send attempt per call, one toast per
// permission answer.
//
// Per attempt:
//   Validating        -> Fail(InvalidInput)
//   CheckingPermission -> Fail(PermissionDenied) + prompt raised
//   Sending           -> Success | Fail(SendError)
//
// Nothing survives between attempts. A permission answer never resumes a
// pending send; the caller resends.

use smsbridge_bridge::traits::PlatformBridge;
use smsbridge_core::error::{Result, SmsBridgeError};
use smsbridge_core::{
    AttemptId, BridgeConfig, PERMISSION_GRANTED, Permission, SendRequest, ToastDuration,
};

/// Payload returned, and toasted, when the OS accepts a message.
pub const SENT_SUCCESSFULLY: &str = "SMS sent successfully";
pub const PERMISSION_GRANTED_TOAST: &str = "Permission granted";
pub const PERMISSION_DENIED_TOAST: &str = "Permission denied";

/// Bridge between channel calls and the platform's SMS facility.
pub struct MessagingBridge {
    platform: Box<dyn PlatformBridge>,
    request_code: i32,
    toast_duration: ToastDuration,
}

impl MessagingBridge {
    pub fn new(platform: Box<dyn PlatformBridge>, config: &BridgeConfig) -> Self {
        Self {
            platform,
            request_code: config.permission_request_code,
            toast_duration: config.toast_duration,
        }
    }

    pub fn platform_name(&self) -> &str {
        self.platform.platform_name()
    }

    /// Send one SMS.
    ///
    /// Returns the confirmation text once the OS has accepted the message
    /// (not once the carrier delivered it). Errors are always one of
    /// `InvalidInput`, `PermissionDenied` or `SendError`.
    pub fn send_message(&self, phone_number: Option<&str>, message: Option<&str>) -> Result<String> {
        let attempt = AttemptId::new();
        let _span = tracing::info_span!("send_sms", %attempt).entered();

        let request = SendRequest::from_args(phone_number, message).inspect_err(|_| {
            tracing::warn!("rejecting send: phone number or message empty");
        })?;

        let state = self
            .platform
            .check_permission(Permission::SendSms)
            .map_err(into_send_error)?;

        if !state.is_granted() {
            tracing::info!(request_code = self.request_code, "SEND_SMS not granted, prompting");
            if let Err(e) = self
                .platform
                .request_permission(Permission::SendSms, self.request_code)
            {
                tracing::warn!(error = %e, "failed to raise permission prompt");
            }
            return Err(SmsBridgeError::PermissionDenied);
        }

        tracing::info!(
            to = %request.masked_phone_number(),
            bytes = request.message().len(),
            "handing SMS to platform"
        );
        self.platform
            .send_text_message(request.phone_number(), request.message())
            .map_err(into_send_error)
            .inspect_err(|e| tracing::error!(error = %e, "platform rejected SMS"))?;

        self.toast(SENT_SUCCESSFULLY);
        Ok(SENT_SUCCESSFULLY.to_owned())
    }

    /// The user answered the permission prompt. Shows a toast and nothing
    /// else; any earlier send stays failed.
    pub fn on_permission_result(&self, granted: bool) {
        tracing::info!(granted, "SEND_SMS permission answered");
        self.toast(if granted {
            PERMISSION_GRANTED_TOAST
        } else {
            PERMISSION_DENIED_TOAST
        });
    }

    /// Raw `onRequestPermissionsResult` arguments. Counts as granted only
    /// for our request code with a first result of `PERMISSION_GRANTED`;
    /// everything else is reported as denied. Returns the decision.
    pub fn handle_permission_result(&self, request_code: i32, grant_results: &[i32]) -> bool {
        let granted = request_code == self.request_code
            && grant_results.first() == Some(&PERMISSION_GRANTED);
        if request_code != self.request_code {
            tracing::debug!(request_code, expected = self.request_code, "foreign request code");
        }
        self.on_permission_result(granted);
        granted
    }

    fn toast(&self, text: &str) {
        if let Err(e) = self.platform.show_toast(text, self.toast_duration) {
            tracing::warn!(error = %e, text, "toast not shown");
        }
    }
}

/// Any failure on the OS path becomes `SendError` with the underlying text.
fn into_send_error(err: SmsBridgeError) -> SmsBridgeError {
    match err {
        SmsBridgeError::SendError(_) => err,
        other => SmsBridgeError::SendError(other.to_string()),
    }
}
