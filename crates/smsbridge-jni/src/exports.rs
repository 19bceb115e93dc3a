// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JNI exports for `com.example.my_sms.NativeSmsBridge`.
//
// Host glue (Kotlin):
//
//     object NativeSmsBridge {
//         init { System.loadLibrary("smsbridge") }
//         external fun nativeAttach(activity: Activity, configJson: String)
//         external fun nativeDetach()
//         external fun nativeHandleMethodCall(callJson: String): String
//         external fun nativeOnRequestPermissionsResult(requestCode: Int, grantResults: IntArray)
//     }
//
// The Activity calls `nativeAttach` in `onCreate`, forwards every call on
// its `MethodChannel` as `{"method", "args"}` JSON, and forwards
// `onRequestPermissionsResult`. An empty reply means `notImplemented()`.

use std::sync::{Arc, RwLock};

use jni::JNIEnv;
use jni::objects::{JClass, JIntArray, JObject, JString};
use jni::sys::{jint, jstring};

use smsbridge_bridge::{android, platform_bridge};
use smsbridge_channel::MethodChannel;
use smsbridge_core::BridgeConfig;
use smsbridge_core::error::{Result, SmsBridgeError};

use crate::logging;

const ILLEGAL_STATE: &str = "java/lang/IllegalStateException";
const ILLEGAL_ARGUMENT: &str = "java/lang/IllegalArgumentException";

static CHANNEL: RwLock<Option<Arc<MethodChannel>>> = RwLock::new(None);

fn current_channel() -> Result<Arc<MethodChannel>> {
    let slot = CHANNEL
        .read()
        .map_err(|_| SmsBridgeError::Bridge("channel slot poisoned".into()))?;
    slot.clone()
        .ok_or_else(|| SmsBridgeError::Bridge("nativeAttach has not been called".into()))
}

/// Raise a Java exception for `err`. Codec and config problems are the
/// caller's fault; everything else is a state problem.
fn throw(env: &mut JNIEnv<'_>, err: &SmsBridgeError) {
    let class = match err {
        SmsBridgeError::Codec(_) | SmsBridgeError::Config(_) | SmsBridgeError::Serialization(_) => {
            ILLEGAL_ARGUMENT
        }
        _ => ILLEGAL_STATE,
    };
    tracing::error!(error = %err, class, "throwing into JVM");
    if env.exception_check().unwrap_or(true) {
        let _ = env.exception_clear();
    }
    if let Err(e) = env.throw_new(class, err.to_string()) {
        tracing::error!(error = %e, "could not throw Java exception");
    }
}

fn rust_string(env: &mut JNIEnv<'_>, s: &JString<'_>) -> Result<String> {
    if s.is_null() {
        return Ok(String::new());
    }
    env.get_string(s)
        .map(Into::into)
        .map_err(|e| SmsBridgeError::Bridge(format!("GetStringUTFChars: {e}")))
}

fn attach(env: &mut JNIEnv<'_>, activity: &JObject<'_>, config_json: &JString<'_>) -> Result<()> {
    let config = BridgeConfig::from_json(&rust_string(env, config_json)?)?;
    let filter = logging::init(&config.log_filter);

    android::attach_activity(env, activity)?;

    let channel = Arc::new(MethodChannel::new(config, platform_bridge()));
    let mut slot = CHANNEL
        .write()
        .map_err(|_| SmsBridgeError::Bridge("channel slot poisoned".into()))?;
    *slot = Some(channel);
    tracing::info!(filter, "native bridge attached");
    Ok(())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_my_1sms_NativeSmsBridge_nativeAttach<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
    config_json: JString<'local>,
) {
    if let Err(err) = attach(&mut env, &activity, &config_json) {
        throw(&mut env, &err);
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_my_1sms_NativeSmsBridge_nativeDetach<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    match CHANNEL.write() {
        Ok(mut slot) => {
            slot.take();
        }
        Err(_) => tracing::error!("channel slot poisoned on detach"),
    }
    android::detach_activity();
}

fn handle_method_call(env: &mut JNIEnv<'_>, call_json: &JString<'_>) -> Result<String> {
    let channel = current_channel()?;
    let call = rust_string(env, call_json)?;
    let reply = channel.handle_encoded(call.as_bytes())?;
    String::from_utf8(reply).map_err(|e| SmsBridgeError::Codec(e.to_string()))
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_my_1sms_NativeSmsBridge_nativeHandleMethodCall<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    call_json: JString<'local>,
) -> jstring {
    let reply = match handle_method_call(&mut env, &call_json) {
        Ok(reply) => reply,
        Err(err) => {
            throw(&mut env, &err);
            return std::ptr::null_mut();
        }
    };
    match env.new_string(reply) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            throw(&mut env, &SmsBridgeError::Bridge(format!("NewStringUTF: {e}")));
            std::ptr::null_mut()
        }
    }
}

fn grant_results(env: &mut JNIEnv<'_>, array: &JIntArray<'_>) -> Result<Vec<jint>> {
    if array.is_null() {
        return Ok(Vec::new());
    }
    let len = env
        .get_array_length(array)
        .map_err(|e| SmsBridgeError::Bridge(format!("GetArrayLength: {e}")))?;
    let mut buf = vec![0; usize::try_from(len).unwrap_or_default()];
    env.get_int_array_region(array, 0, &mut buf)
        .map_err(|e| SmsBridgeError::Bridge(format!("GetIntArrayRegion: {e}")))?;
    Ok(buf)
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_example_my_1sms_NativeSmsBridge_nativeOnRequestPermissionsResult<
    'local,
>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    request_code: jint,
    grant_results_array: JIntArray<'local>,
) {
    let result = current_channel().and_then(|channel| {
        let results = grant_results(&mut env, &grant_results_array)?;
        channel.on_request_permissions_result(request_code, &results);
        Ok(())
    });
    if let Err(err) = result {
        throw(&mut env, &err);
    }
}
