// Logging shims: every event goes to the `windowed_list` target, and the whole thing compiles
// to nothing without `feature = "tracing"`.

#[cfg(feature = "tracing")]
macro_rules! wlog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "windowed_list", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! wlog {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! wtrace {
    ($($tt:tt)*) => { wlog!(trace, $($tt)*) };
}

macro_rules! wdebug {
    ($($tt:tt)*) => { wlog!(debug, $($tt)*) };
}

macro_rules! wwarn {
    ($($tt:tt)*) => { wlog!(warn, $($tt)*) };
}
