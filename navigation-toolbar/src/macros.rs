// Every engine event goes to the `navigation_toolbar` target. Without the `tracing` feature the
// calls expand to nothing, arguments included.

#[cfg(feature = "tracing")]
macro_rules! nevent {
    ($level:ident, $($tt:tt)*) => {
        tracing::event!(target: "navigation_toolbar", tracing::Level::$level, $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! nevent {
    ($level:ident, $($tt:tt)*) => {};
}

/// Per-frame detail: fills, drags, scroll state flips.
macro_rules! ntrace {
    ($($tt:tt)*) => {
        nevent!(TRACE, $($tt)*)
    };
}

/// Lifecycle and motion starts.
macro_rules! ndebug {
    ($($tt:tt)*) => {
        nevent!(DEBUG, $($tt)*)
    };
}

/// Inconsistent state the engine recovered from.
macro_rules! nwarn {
    ($($tt:tt)*) => {
        nevent!(WARN, $($tt)*)
    };
}
