#[cfg(feature = "tracing")]
macro_rules! strace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "slidelist", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! strace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! sdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "slidelist", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! swarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "slidelist", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! swarn {
    ($($tt:tt)*) => {};
}
