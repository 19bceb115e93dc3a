// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording platform bridge for unit tests.

use std::sync::{Arc, Mutex};

use smsbridge_bridge::traits::*;
use smsbridge_core::error::{Result, SmsBridgeError};
use smsbridge_core::{Permission, PermissionState, ToastDuration};

/// Everything the fake was asked to do, plus its scripted answers.
#[derive(Debug, Default)]
pub struct FakeLog {
    pub permission_checks: usize,
    pub permission_requests: Vec<(Permission, i32)>,
    pub sent: Vec<(String, String)>,
    pub toasts: Vec<(String, ToastDuration)>,
}

pub struct FakeState {
    pub granted: bool,
    /// When set, `send_text_message` fails with this error text.
    pub send_failure: Option<String>,
    /// When set, `check_permission` itself fails.
    pub check_failure: bool,
    pub log: Mutex<FakeLog>,
}

impl FakeState {
    pub fn log(&self) -> std::sync::MutexGuard<'_, FakeLog> {
        self.log.lock().unwrap()
    }
}

pub struct FakeBridge {
    state: Arc<FakeState>,
}

impl FakeBridge {
    pub fn granted() -> (Box<dyn PlatformBridge>, Arc<FakeState>) {
        Self::build(true, None, false)
    }

    pub fn denied() -> (Box<dyn PlatformBridge>, Arc<FakeState>) {
        Self::build(false, None, false)
    }

    pub fn failing_send(detail: &str) -> (Box<dyn PlatformBridge>, Arc<FakeState>) {
        Self::build(true, Some(detail.to_owned()), false)
    }

    pub fn failing_check() -> (Box<dyn PlatformBridge>, Arc<FakeState>) {
        Self::build(true, None, true)
    }

    fn build(
        granted: bool,
        send_failure: Option<String>,
        check_failure: bool,
    ) -> (Box<dyn PlatformBridge>, Arc<FakeState>) {
        let state = Arc::new(FakeState {
            granted,
            send_failure,
            check_failure,
            log: Mutex::new(FakeLog::default()),
        });
        (Box::new(FakeBridge { state: Arc::clone(&state) }), state)
    }
}

impl PlatformBridge for FakeBridge {
    fn platform_name(&self) -> &str {
        "Fake"
    }
}

impl NativeSms for FakeBridge {
    fn send_text_message(&self, destination: &str, body: &str) -> Result<()> {
        if let Some(detail) = &self.state.send_failure {
            return Err(SmsBridgeError::SendError(detail.clone()));
        }
        self.state.log().sent.push((destination.to_owned(), body.to_owned()));
        Ok(())
    }
}

impl NativePermissions for FakeBridge {
    fn check_permission(&self, _permission: Permission) -> Result<PermissionState> {
        self.state.log().permission_checks += 1;
        if self.state.check_failure {
            return Err(SmsBridgeError::Bridge("checkSelfPermission: DeadObjectException".into()));
        }
        Ok(if self.state.granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        })
    }

    fn request_permission(&self, permission: Permission, request_code: i32) -> Result<()> {
        self.state.log().permission_requests.push((permission, request_code));
        Ok(())
    }
}

impl NativeToast for FakeBridge {
    fn show_toast(&self, text: &str, duration: ToastDuration) -> Result<()> {
        self.state.log().toasts.push((text.to_owned(), duration));
        Ok(())
    }
}
