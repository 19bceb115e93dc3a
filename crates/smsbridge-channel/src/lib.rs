// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// smsbridge — the messaging bridge and the method channel in front of it.
//
// `messaging` owns the send flow (validate, check permission, dispatch) and
// the permission-result callback. `channel` maps method calls onto it and
// its errors onto channel error codes. `codec` is the JSON wire format the
// host speaks.

pub mod channel;
pub mod codec;
pub mod messaging;

#[cfg(test)]
mod fake;

pub use channel::{MethodCall, MethodChannel, MethodReply};
pub use messaging::MessagingBridge;
