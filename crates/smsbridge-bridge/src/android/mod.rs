// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Targets `aarch64-linux-android` / `armv7-linux-androideabi`. Each trait
// method calls the matching Android SDK API through JNI.
//
// ## Architecture notes
//
// The host is a regular Activity (not a NativeActivity), so there is no
// NDK-provided context. The host hands its Activity over once via
// `attach_activity`; the Java VM and a global reference to the Activity are
// kept in process-wide statics until `detach_activity`.
//
// The permission prompt is asynchronous: `request_permission` only schedules
// it. The answer lands in the Activity's `onRequestPermissionsResult`, which
// the host forwards to the channel independently of any send.
//
// All calls are expected on the Activity's main thread (Toast needs a
// Looper).

#![cfg(target_os = "android")]

use std::sync::{OnceLock, RwLock};

use jni::objects::{GlobalRef, JObject, JString, JThrowable, JValue};
use jni::{JNIEnv, JavaVM};

use smsbridge_core::error::{Result, SmsBridgeError};
use smsbridge_core::{Permission, PermissionState, ToastDuration};

use crate::exception::{ExceptionEnv, take_exception_message};
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// First API level where `SmsManager.getDefault()` is deprecated in favour
/// of `Context.getSystemService(SmsManager.class)`.
const API_LEVEL_S: i32 = 31;

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();
static ACTIVITY: RwLock<Option<GlobalRef>> = RwLock::new(None);

/// Register the host Activity. Safe to call again after the Activity is
/// recreated; the previous reference is released.
pub fn attach_activity(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<()> {
    if activity.is_null() {
        return Err(SmsBridgeError::Bridge("attach_activity: activity is null".into()));
    }
    if JAVA_VM.get().is_none() {
        let vm = env.get_java_vm().map_err(|e| jni_err("GetJavaVM", e))?;
        // A concurrent attach may have won; both handles point at the same VM.
        let _ = JAVA_VM.set(vm);
    }
    let global = env
        .new_global_ref(activity)
        .map_err(|e| jni_err("NewGlobalRef(activity)", e))?;

    let mut slot = ACTIVITY
        .write()
        .map_err(|_| SmsBridgeError::Bridge("activity slot poisoned".into()))?;
    *slot = Some(global);
    tracing::info!("Android: activity attached");
    Ok(())
}

/// Release the host Activity. Subsequent bridge calls fail with
/// `SmsBridgeError::Bridge` until the next `attach_activity`.
pub fn detach_activity() {
    match ACTIVITY.write() {
        Ok(mut slot) => {
            if slot.take().is_some() {
                tracing::info!("Android: activity detached");
            }
        }
        Err(_) => tracing::error!("Android: activity slot poisoned on detach"),
    }
}

/// Obtain a [`JNIEnv`] for the current thread.
fn jni_env() -> Result<JNIEnv<'static>> {
    let vm = JAVA_VM.get().ok_or_else(|| {
        SmsBridgeError::Bridge("JavaVM not captured: attach_activity was never called".into())
    })?;
    vm.attach_current_thread_permanently()
        .map_err(|e| jni_err("failed to attach JNI thread", e))
}

/// The currently attached Activity.
fn activity() -> Result<GlobalRef> {
    let slot = ACTIVITY
        .read()
        .map_err(|_| SmsBridgeError::Bridge("activity slot poisoned".into()))?;
    slot.clone().ok_or_else(|| {
        SmsBridgeError::Bridge("no activity attached: native bridge not initialised".into())
    })
}

/// Convenience: map any `jni::errors::Error` into `SmsBridgeError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> SmsBridgeError {
    SmsBridgeError::Bridge(format!("{context}: {e}"))
}

/// Map a failed JNI call. If a Java exception is pending it is cleared (so
/// later JNI calls on this thread still work) and its message is returned.
fn call_failed(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> SmsBridgeError {
    if matches!(e, jni::errors::Error::JavaException) {
        if let Some(message) = take_exception_message(env) {
            return SmsBridgeError::Bridge(format!("{context}: {message}"));
        }
    }
    jni_err(context, e)
}

impl<'local> ExceptionEnv for JNIEnv<'local> {
    type Throwable = JThrowable<'local>;

    fn occurred(&mut self) -> Option<JThrowable<'local>> {
        self.exception_occurred().ok().filter(|t| !t.is_null())
    }

    fn pending(&mut self) -> bool {
        self.exception_check().unwrap_or(true)
    }

    fn clear(&mut self) {
        let _ = self.exception_clear();
    }

    fn describe(&mut self, throwable: &JThrowable<'local>) -> Option<String> {
        let message = self
            .call_method(throwable, "getMessage", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        if !message.is_null() {
            return java_string(self, message);
        }

        let class = self
            .call_method(throwable, "getClass", "()Ljava/lang/Class;", &[])
            .ok()?
            .l()
            .ok()?;
        let name = self
            .call_method(&class, "getName", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        java_string(self, name)
    }
}

fn java_string(env: &mut JNIEnv<'_>, obj: JObject<'_>) -> Option<String> {
    let s = JString::from(obj);
    env.get_string(&s).ok().map(Into::into)
}

/// `Build.VERSION.SDK_INT` of the running device.
fn sdk_int(env: &mut JNIEnv<'_>) -> Result<i32> {
    env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .map_err(|e| call_failed(env, "Build.VERSION.SDK_INT", e))?
        .i()
        .map_err(|e| jni_err("SDK_INT->i", e))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the platform bridge.
///
/// Zero-sized; the JNI handles live in module statics.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge. Does not touch JNI.
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeSms — android.telephony.SmsManager
// ---------------------------------------------------------------------------

impl NativeSms for AndroidBridge {
    /// `smsManager.sendTextMessage(destination, null, body, null, null)`.
    ///
    /// A Java exception thrown by the send surfaces as
    /// `SmsBridgeError::SendError` carrying the exception text.
    fn send_text_message(&self, destination: &str, body: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let sms_manager = sms_manager(&mut env, activity.as_obj())?;

        let j_destination: JString = env
            .new_string(destination)
            .map_err(|e| jni_err("new_string(destination)", e))?;
        let j_body: JString = env
            .new_string(body)
            .map_err(|e| jni_err("new_string(body)", e))?;
        let null = JObject::null();

        let sent = env.call_method(
            &sms_manager,
            "sendTextMessage",
            "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;Landroid/app/PendingIntent;Landroid/app/PendingIntent;)V",
            &[
                JValue::Object(&j_destination),
                JValue::Object(&null),
                JValue::Object(&j_body),
                JValue::Object(&null),
                JValue::Object(&null),
            ],
        );

        match sent {
            Ok(_) => {
                tracing::debug!(bytes = body.len(), "Android: SmsManager accepted message");
                Ok(())
            }
            Err(jni::errors::Error::JavaException) => {
                let detail = take_exception_message(&mut env)
                    .unwrap_or_else(|| "unknown Java exception".into());
                Err(SmsBridgeError::SendError(detail))
            }
            Err(e) => Err(jni_err("SmsManager.sendTextMessage", e)),
        }
    }
}

/// Resolve the platform `SmsManager` for the running API level.
fn sms_manager<'a>(env: &mut JNIEnv<'a>, activity: &JObject<'_>) -> Result<JObject<'a>> {
    let manager = if sdk_int(env)? >= API_LEVEL_S {
        let class = env
            .find_class("android/telephony/SmsManager")
            .map_err(|e| call_failed(env, "FindClass(SmsManager)", e))?;
        env.call_method(
            activity,
            "getSystemService",
            "(Ljava/lang/Class;)Ljava/lang/Object;",
            &[JValue::Object(&class)],
        )
        .map_err(|e| call_failed(env, "getSystemService(SmsManager)", e))?
        .l()
        .map_err(|e| jni_err("getSystemService->l", e))?
    } else {
        env.call_static_method(
            "android/telephony/SmsManager",
            "getDefault",
            "()Landroid/telephony/SmsManager;",
            &[],
        )
        .map_err(|e| call_failed(env, "SmsManager.getDefault", e))?
        .l()
        .map_err(|e| jni_err("getDefault->l", e))?
    };

    if manager.is_null() {
        return Err(SmsBridgeError::SendError("SmsManager unavailable on this device".into()));
    }
    Ok(manager)
}

// ---------------------------------------------------------------------------
// NativePermissions — Context.checkSelfPermission / Activity.requestPermissions
// ---------------------------------------------------------------------------

impl NativePermissions for AndroidBridge {
    fn check_permission(&self, permission: Permission) -> Result<PermissionState> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_permission: JString = env
            .new_string(permission.android_name())
            .map_err(|e| jni_err("new_string(permission)", e))?;

        let result = env
            .call_method(
                activity.as_obj(),
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&j_permission)],
            )
            .map_err(|e| call_failed(&mut env, "checkSelfPermission", e))?
            .i()
            .map_err(|e| jni_err("checkSelfPermission->i", e))?;

        let state = PermissionState::from_grant_result(result);
        tracing::debug!(permission = permission.android_name(), ?state, "Android: permission checked");
        Ok(state)
    }

    fn request_permission(&self, permission: Permission, request_code: i32) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        tracing::info!(
            permission = permission.android_name(),
            request_code,
            "Android: requesting runtime permission"
        );

        let j_permission: JString = env
            .new_string(permission.android_name())
            .map_err(|e| jni_err("new_string(permission)", e))?;

        // new String[] { permission }
        let permissions = env
            .new_object_array(1, "java/lang/String", &j_permission)
            .map_err(|e| jni_err("new_object_array(String)", e))?;

        env.call_method(
            activity.as_obj(),
            "requestPermissions",
            "([Ljava/lang/String;I)V",
            &[JValue::Object(&permissions), JValue::Int(request_code)],
        )
        .map_err(|e| call_failed(&mut env, "requestPermissions", e))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeToast — android.widget.Toast
// ---------------------------------------------------------------------------

impl NativeToast for AndroidBridge {
    fn show_toast(&self, text: &str, duration: ToastDuration) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_text: JString = env
            .new_string(text)
            .map_err(|e| jni_err("new_string(toast)", e))?;

        let toast = env
            .call_static_method(
                "android/widget/Toast",
                "makeText",
                "(Landroid/content/Context;Ljava/lang/CharSequence;I)Landroid/widget/Toast;",
                &[
                    JValue::Object(activity.as_obj()),
                    JValue::Object(&j_text),
                    JValue::Int(duration.android_length()),
                ],
            )
            .map_err(|e| call_failed(&mut env, "Toast.makeText", e))?
            .l()
            .map_err(|e| jni_err("makeText->l", e))?;

        env.call_method(&toast, "show", "()V", &[])
            .map_err(|e| call_failed(&mut env, "Toast.show", e))?;

        Ok(())
    }
}
