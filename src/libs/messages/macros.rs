//! Macros for printing [`Message`](super::Message)s.
//!
//! With `JTL_DEBUG` or `RUST_LOG` set, messages are emitted as tracing events
//! and show up next to the diagnostic logs. Without them they are plain
//! console lines. Only `msg_error!` writes to stderr, so report tables piped
//! elsewhere stay clean.
//!
//! ```rust
//! use jtl::{msg_info, msg_success};
//! use jtl::libs::messages::Message;
//!
//! msg_success!(Message::PushSummary { pushed: 3, total: 3 });
//! msg_info!(Message::PreviewTotal(3));
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether `JTL_DEBUG` or `RUST_LOG` is set. Checked once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var_os("JTL_DEBUG").is_some() || std::env::var_os("RUST_LOG").is_some())
}

/// Routes one formatted line either to a tracing macro or to a print macro.
#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($event:ident, $print:ident, $($arg:tt)+) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$event!($($arg)+);
        } else {
            $print!($($arg)+);
        }
    };
}

/// Prints a message without a prefix. `, true` surrounds it with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "{}", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "\n{}\n", $msg)
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "✅ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "ℹ️ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, "⚠️ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, "❌ {}", $msg)
    };
}
