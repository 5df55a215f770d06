/*!
  Tracing macros. Calls expand to stderr writes when the `DEBUG` feature is enabled and to
  nothing otherwise, so leaving them in hot paths costs normal builds nothing.
*/

/// Writes formatted trace output to stderr under the `DEBUG` feature.
#[macro_export]
macro_rules! debug_log {
  ($($args:tt)*) => {
    if cfg!(feature = "DEBUG") {
      eprint!($($args)*);
    }
  };
}

/// Same as `debug_log!` but appends a newline.
#[macro_export]
macro_rules! debug_logln {
  ($($args:tt)*) => {
    if cfg!(feature = "DEBUG") {
      eprintln!($($args)*);
    }
  };
}
