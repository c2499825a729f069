#[cfg(feature = "tracing")]
macro_rules! atrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "slidelist_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! atrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! adebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "slidelist_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adebug {
    ($($tt:tt)*) => {};
}

// Only the JSON stream warns.
#[cfg(feature = "tracing")]
#[cfg_attr(not(feature = "json"), allow(unused_macros))]
macro_rules! awarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "slidelist_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
#[cfg_attr(not(feature = "json"), allow(unused_macros))]
macro_rules! awarn {
    ($($tt:tt)*) => {};
}
