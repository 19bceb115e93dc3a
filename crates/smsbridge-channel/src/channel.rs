// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method channel dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use smsbridge_bridge::traits::PlatformBridge;
use smsbridge_core::BridgeConfig;
use smsbridge_core::error::{CODE_SEND_SMS_ERROR, Result, SmsBridgeError};

use crate::codec;
use crate::messaging::MessagingBridge;

/// Argument key for the destination number.
pub const ARG_PHONE_NUMBER: &str = "phoneNumber";
/// Argument key for the message body.
pub const ARG_MESSAGE: &str = "message";

/// A method invocation arriving from the application layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub args: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, args: Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// String argument by key. Missing keys, non-object `args` and
    /// non-string values all read as absent.
    pub fn string_arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

/// Answer sent back over the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodReply {
    Success(Value),
    Error {
        code: String,
        message: String,
        details: Value,
    },
    NotImplemented,
}

impl MethodReply {
    /// Error reply for a failed call. Errors without a channel code of
    /// their own are reported as send failures.
    pub fn from_error(err: &SmsBridgeError) -> Self {
        MethodReply::Error {
            code: err.channel_code().unwrap_or(CODE_SEND_SMS_ERROR).to_owned(),
            message: err.to_string(),
            details: Value::Null,
        }
    }
}

/// The `sendSms` channel: configuration plus the messaging bridge behind it.
pub struct MethodChannel {
    config: BridgeConfig,
    bridge: MessagingBridge,
}

impl MethodChannel {
    pub fn new(config: BridgeConfig, platform: Box<dyn PlatformBridge>) -> Self {
        let bridge = MessagingBridge::new(platform, &config);
        tracing::info!(
            channel = %config.channel_name,
            platform = bridge.platform_name(),
            "method channel ready"
        );
        Self { config, bridge }
    }

    pub fn handle(&self, call: &MethodCall) -> MethodReply {
        if call.method != self.config.send_method {
            tracing::debug!(method = %call.method, "method not implemented");
            return MethodReply::NotImplemented;
        }

        let result = self
            .bridge
            .send_message(call.string_arg(ARG_PHONE_NUMBER), call.string_arg(ARG_MESSAGE));
        match result {
            Ok(confirmation) => MethodReply::Success(Value::String(confirmation)),
            Err(err) => {
                let reply = MethodReply::from_error(&err);
                if let MethodReply::Error { code, .. } = &reply {
                    tracing::info!(method = %call.method, %code, "call failed");
                }
                reply
            }
        }
    }

    /// Decode, dispatch and encode in one step. Only codec failures are
    /// returned as `Err`; bridge failures are error replies.
    pub fn handle_encoded(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let call = codec::decode_method_call(bytes)?;
        codec::encode_reply(&self.handle(&call))
    }

    /// Forward the host's `onRequestPermissionsResult`.
    pub fn on_request_permissions_result(&self, request_code: i32, grant_results: &[i32]) -> bool {
        self.bridge.handle_permission_result(request_code, grant_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBridge;
    use serde_json::json;

    fn send_call(phone: Value, message: Value) -> MethodCall {
        MethodCall::new("sendSms", json!({ "phoneNumber": phone, "message": message }))
    }

    fn error_code(reply: &MethodReply) -> &str {
        match reply {
            MethodReply::Error { code, .. } => code.as_str(),
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[test]
    fn denied_scenario() {
        let (platform, state) = FakeBridge::denied();
        let channel = MethodChannel::new(BridgeConfig::default(), platform);
        let reply = channel.handle(&send_call(json!("+15551234567"), json!("hello")));
        assert_eq!(
            reply,
            MethodReply::Error {
                code: "PERMISSION_DENIED".into(),
                message: "SMS permission denied".into(),
                details: Value::Null,
            }
        );
        assert_eq!(state.log().permission_requests.len(), 1);
    }

    #[test]
    fn empty_phone_scenario() {
        let (platform, state) = FakeBridge::granted();
        let channel = MethodChannel::new(BridgeConfig::default(), platform);
        let reply = channel.handle(&send_call(json!(""), json!("hello")));
        assert_eq!(error_code(&reply), "INVALID_INPUT");
        if let MethodReply::Error { message, .. } = &reply {
            assert_eq!(message, "Phone number or message is empty");
        }
        assert_eq!(state.log().permission_checks, 0);
    }

    #[test]
    fn granted_scenario() {
        let (platform, state) = FakeBridge::granted();
        let channel = MethodChannel::new(BridgeConfig::default(), platform);
        let reply = channel.handle(&send_call(json!("+15551234567"), json!("hi")));
        assert_eq!(reply, MethodReply::Success(json!("SMS sent successfully")));
        assert_eq!(state.log().toasts.len(), 1);
    }

    #[test]
    fn send_failure_reply() {
        let (platform, _state) = FakeBridge::failing_send("RESULT_ERROR_NO_SERVICE");
        let channel = MethodChannel::new(BridgeConfig::default(), platform);
        let reply = channel.handle(&send_call(json!("+15551234567"), json!("hi")));
        match reply {
            MethodReply::Error { code, message, .. } => {
                assert_eq!(code, "SEND_SMS_ERROR");
                assert_eq!(message, "Failed to send SMS: RESULT_ERROR_NO_SERVICE");
            }
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[test]
    fn non_string_and_missing_args_are_invalid() {
        let (platform, state) = FakeBridge::granted();
        let channel = MethodChannel::new(BridgeConfig::default(), platform);
        for call in [
            send_call(json!(15551234567u64), json!("hi")),
            send_call(Value::Null, json!("hi")),
            MethodCall::new("sendSms", json!({ "message": "hi" })),
            MethodCall::new("sendSms", Value::Null),
            MethodCall::new("sendSms", json!(["+15551234567", "hi"])),
        ] {
            assert_eq!(error_code(&channel.handle(&call)), "INVALID_INPUT");
        }
        assert!(state.log().sent.is_empty());
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let (platform, state) = FakeBridge::granted();
        let channel = MethodChannel::new(BridgeConfig::default(), platform);
        let reply = channel.handle(&MethodCall::new("sendMms", json!({})));
        assert_eq!(reply, MethodReply::NotImplemented);
        assert_eq!(state.log().permission_checks, 0);
    }

    #[test]
    fn configured_method_name_is_honoured() {
        let (platform, _state) = FakeBridge::granted();
        let config = BridgeConfig {
            send_method: "sendText".into(),
            ..Default::default()
        };
        let channel = MethodChannel::new(config, platform);
        assert_eq!(
            channel.handle(&send_call(json!("+15551234567"), json!("hi"))),
            MethodReply::NotImplemented
        );
        let call = MethodCall::new("sendText", json!({ "phoneNumber": "+1555", "message": "hi" }));
        assert!(matches!(channel.handle(&call), MethodReply::Success(_)));
    }

    #[test]
    fn encoded_round_trip_through_channel() {
        let (platform, _state) = FakeBridge::granted();
        let channel = MethodChannel::new(BridgeConfig::default(), platform);
        let bytes = channel
            .handle_encoded(
                br#"{"method":"sendSms","args":{"phoneNumber":"+15551234567","message":"hi"}}"#,
            )
            .unwrap();
        assert_eq!(bytes, br#"["SMS sent successfully"]"#);
        assert!(channel.handle_encoded(br#"{"method":"nope"}"#).unwrap().is_empty());
        assert!(matches!(
            channel.handle_encoded(b"{"),
            Err(SmsBridgeError::Codec(_))
        ));
    }

    #[test]
    fn permission_result_forwarded() {
        let (platform, state) = FakeBridge::denied();
        let channel = MethodChannel::new(BridgeConfig::default(), platform);
        assert!(channel.on_request_permissions_result(1, &[0]));
        assert_eq!(state.log().toasts[0].0, "Permission granted");
        assert!(state.log().sent.is_empty());
    }

    #[test]
    fn internal_errors_map_to_send_error_code() {
        let reply = MethodReply::from_error(&SmsBridgeError::PlatformUnavailable);
        assert_eq!(error_code(&reply), "SEND_SMS_ERROR");
    }
}
