// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Containing panics raised inside step callbacks.

use std::{
    any::Any,
    backtrace::Backtrace,
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

/// Message used when a panic payload is neither a [`String`] nor a `&str`.
pub const OPAQUE_PAYLOAD: &str = "(Could not resolve panic payload)";

thread_local! {
    /// Whether the current thread runs inside [`trap()`].
    static TRAPPING: Cell<bool> = const { Cell::new(false) };

    /// Details recorded by the panic hook for the current thread.
    static CAUGHT: RefCell<Option<PanicDetails>> = const { RefCell::new(None) };
}

/// Panic caught by [`trap()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PanicDetails {
    /// Panic message.
    pub payload: String,

    /// `file:line:column` the panic was raised at, if known.
    pub location: Option<String>,

    /// Backtrace of the panic site.
    pub trace: String,
}

impl PanicDetails {
    fn from_payload(payload: &(dyn Any + Send + 'static)) -> Self {
        Self {
            payload: coerce_payload(payload),
            location: None,
            trace: String::new(),
        }
    }
}

/// Runs the given function, turning a panic raised by it into an [`Err`] with
/// the [`PanicDetails`] if `catch` is `true`.
///
/// With `catch` being `false` the panic propagates as usual.
pub fn trap<T>(catch: bool, f: impl FnOnce() -> T) -> Result<T, PanicDetails> {
    if !catch {
        return Ok(f());
    }
    install_hook();

    let outer = TRAPPING.with(|t| t.replace(true));
    let res = panic::catch_unwind(AssertUnwindSafe(f));
    TRAPPING.with(|t| t.set(outer));

    res.map_err(|p| {
        CAUGHT
            .with(|c| c.borrow_mut().take())
            .unwrap_or_else(|| PanicDetails::from_payload(&*p))
    })
}

/// Installs, once per process, a panic hook recording [`PanicDetails`] of
/// panics raised inside [`trap()`] and delegating all the others to the
/// previous hook.
fn install_hook() {
    static INSTALL: Once = Once::new();

    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !TRAPPING.with(Cell::get) {
                previous(info);
                return;
            }
            let details = PanicDetails {
                payload: coerce_payload(info.payload()),
                location: info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
                trace: Backtrace::force_capture().to_string(),
            };
            CAUGHT.with(|c| *c.borrow_mut() = Some(details));
        }));
    });
}

/// Extracts the message out of a panic payload.
fn coerce_payload(payload: &(dyn Any + Send + 'static)) -> String {
    if let Some(string) = payload.downcast_ref::<String>() {
        string.clone()
    } else if let Some(string) = payload.downcast_ref::<&str>() {
        (*string).to_owned()
    } else {
        OPAQUE_PAYLOAD.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload<T>(res: Result<T, PanicDetails>) -> Result<T, String> {
        res.map_err(|d| d.payload)
    }

    #[test]
    fn passes_values_through() {
        assert_eq!(trap(true, || 42), Ok(42));
        assert_eq!(trap(false, || "ok"), Ok("ok"));
    }

    #[test]
    fn catches_panic_messages() {
        assert_eq!(
            payload(trap(true, || panic!("static"))),
            Err("static".to_owned()),
        );
        let n = 3;
        assert_eq!(
            payload(trap(true, || panic!("formatted {n}"))),
            Err("formatted 3".to_owned()),
        );
    }

    #[test]
    fn opaque_payloads_are_named() {
        let res = trap(true, || panic::panic_any(7_u8));
        assert_eq!(payload(res), Err(OPAQUE_PAYLOAD.to_owned()));
    }

    #[test]
    fn records_panic_site() {
        let line = line!() + 1;
        let details = trap(true, || panic!("here")).unwrap_err();

        let location = details.location.unwrap();
        assert!(
            location.starts_with(&format!("{}:{line}:", file!())),
            "unexpected location: {location}",
        );
        assert!(!details.trace.is_empty());
    }

    #[test]
    fn nested_traps_keep_outer_one_active() {
        let inner = trap(true, || payload(trap(true, || panic!("inner"))));
        assert_eq!(inner, Ok(Err("inner".to_owned())));

        let outer = trap(true, || {
            _ = trap(true, || 1);
            panic!("outer")
        });
        assert_eq!(payload(outer), Err("outer".to_owned()));
    }

    #[test]
    #[should_panic(expected = "let it go")]
    fn propagates_when_not_catching() {
        let _ = trap(false, || panic!("let it go"));
    }
}
