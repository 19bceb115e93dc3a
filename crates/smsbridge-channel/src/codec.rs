// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON method codec, wire-compatible with Flutter's `JSONMethodCodec`.
//
//   call:     {"method": "sendSms", "args": {...}}
//   success:  [result]
//   error:    [code, message, details]
//   not implemented: empty reply

use serde::Deserialize;
use serde_json::{Value, json};

use smsbridge_core::error::{Result, SmsBridgeError};

use crate::channel::{MethodCall, MethodReply};

#[derive(Deserialize)]
struct CallEnvelope {
    method: String,
    #[serde(default)]
    args: Value,
}

/// Decode a method call. Invalid JSON or a missing `method` is a
/// [`SmsBridgeError::Codec`] error.
pub fn decode_method_call(bytes: &[u8]) -> Result<MethodCall> {
    let envelope: CallEnvelope =
        serde_json::from_slice(bytes).map_err(|e| SmsBridgeError::Codec(e.to_string()))?;
    Ok(MethodCall {
        method: envelope.method,
        args: envelope.args,
    })
}

pub fn encode_reply(reply: &MethodReply) -> Result<Vec<u8>> {
    let envelope = match reply {
        MethodReply::Success(result) => json!([result]),
        MethodReply::Error {
            code,
            message,
            details,
        } => json!([code, message, details]),
        MethodReply::NotImplemented => return Ok(Vec::new()),
    };
    Ok(serde_json::to_vec(&envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_send_call() {
        let call = decode_method_call(
            br#"{"method":"sendSms","args":{"phoneNumber":"+15551234567","message":"hi"}}"#,
        )
        .unwrap();
        assert_eq!(call.method, "sendSms");
        assert_eq!(call.args["phoneNumber"], "+15551234567");
    }

    #[test]
    fn args_may_be_omitted() {
        let call = decode_method_call(br#"{"method":"ping"}"#).unwrap();
        assert_eq!(call.args, Value::Null);
    }

    #[test]
    fn missing_method_is_codec_error() {
        assert!(matches!(
            decode_method_call(br#"{"args":{}}"#),
            Err(SmsBridgeError::Codec(_))
        ));
        assert!(matches!(decode_method_call(b"not json"), Err(SmsBridgeError::Codec(_))));
    }

    #[test]
    fn success_envelope_is_single_element_array() {
        let bytes = encode_reply(&MethodReply::Success(json!("SMS sent successfully"))).unwrap();
        assert_eq!(bytes, br#"["SMS sent successfully"]"#);
    }

    #[test]
    fn error_envelope_has_three_elements() {
        let reply = MethodReply::Error {
            code: "PERMISSION_DENIED".into(),
            message: "SMS permission denied".into(),
            details: Value::Null,
        };
        let bytes = encode_reply(&reply).unwrap();
        assert_eq!(bytes, br#"["PERMISSION_DENIED","SMS permission denied",null]"#);
    }

    #[test]
    fn not_implemented_is_empty() {
        assert!(encode_reply(&MethodReply::NotImplemented).unwrap().is_empty());
    }
}
