//! Call-site macros. Each level has a `log_`-prefixed name and a plain
//! alias, plus `normal!` which is another name for the info level. Every
//! macro captures `file!`, `line!` and `module_path!`, checks the level gate,
//! and hands the formatted record to the pipeline. Before `Logger::init` has
//! run they are no-ops.

mod __test__;

#[doc(hidden)]
#[macro_export]
macro_rules! __ringlog_log {
  ($level:expr, $($arg:tt)*) => {
    if let Some(logger) = $crate::logger::Logger::handle() {
      if logger.enabled($level) {
        logger.try_append($level, ::core::format_args!($($arg)*), file!(), line!(), module_path!());
      }
    }
  };
}

#[macro_export]
macro_rules! log_trace {
  ($($arg:tt)*) => { $crate::__ringlog_log!($crate::level::Level::Trace, $($arg)*) };
}

#[macro_export]
macro_rules! log_debug {
  ($($arg:tt)*) => { $crate::__ringlog_log!($crate::level::Level::Debug, $($arg)*) };
}

#[macro_export]
macro_rules! log_info {
  ($($arg:tt)*) => { $crate::__ringlog_log!($crate::level::Level::Info, $($arg)*) };
}

#[macro_export]
macro_rules! log_normal {
  ($($arg:tt)*) => { $crate::__ringlog_log!($crate::level::Level::Info, $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
  ($($arg:tt)*) => { $crate::__ringlog_log!($crate::level::Level::Warn, $($arg)*) };
}

#[macro_export]
macro_rules! log_error {
  ($($arg:tt)*) => { $crate::__ringlog_log!($crate::level::Level::Error, $($arg)*) };
}

#[macro_export]
macro_rules! log_fatal {
  ($($arg:tt)*) => { $crate::__ringlog_log!($crate::level::Level::Fatal, $($arg)*) };
}

#[macro_export]
macro_rules! trace {
  ($($arg:tt)*) => { $crate::log_trace!($($arg)*) };
}

#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => { $crate::log_debug!($($arg)*) };
}

#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => { $crate::log_info!($($arg)*) };
}

#[macro_export]
macro_rules! normal {
  ($($arg:tt)*) => { $crate::log_normal!($($arg)*) };
}

#[macro_export]
macro_rules! warn {
  ($($arg:tt)*) => { $crate::log_warn!($($arg)*) };
}

#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => { $crate::log_error!($($arg)*) };
}

#[macro_export]
macro_rules! fatal {
  ($($arg:tt)*) => { $crate::log_fatal!($($arg)*) };
}
