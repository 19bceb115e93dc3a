// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pending-exception handling for native calls into a managed runtime.
//
// A JNI call made while an exception is pending is undefined behaviour
// (and aborts under CheckJNI), so every path out of `take_exception_message`
// leaves the runtime with no exception pending.

/// The few runtime operations needed to take and describe an exception.
pub trait ExceptionEnv {
    type Throwable;

    /// The pending exception, if any. Does not clear it.
    fn occurred(&mut self) -> Option<Self::Throwable>;

    /// Whether an exception is pending. Unknown counts as pending.
    fn pending(&mut self) -> bool;

    fn clear(&mut self);

    /// `getMessage()`, or the class name when the message is null. May
    /// itself leave a new exception pending.
    fn describe(&mut self, throwable: &Self::Throwable) -> Option<String>;
}

/// Clear the pending exception and return its description.
pub fn take_exception_message<E: ExceptionEnv>(env: &mut E) -> Option<String> {
    let throwable = env.occurred();
    clear_pending(env);
    let throwable = throwable?;

    let description = env.describe(&throwable);
    clear_pending(env);
    description
}

fn clear_pending<E: ExceptionEnv>(env: &mut E) {
    if env.pending() {
        env.clear();
    }
}
