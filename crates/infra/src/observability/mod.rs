//! Observability infrastructure
//!
//! Structured logging for classified data errors and the process-wide
//! tracing subscriber. The safe-call pipeline itself only emits `debug!`
//! trace points; callers decide where failures are reported by tapping
//! results with [`logging::log_data_error`].

pub mod logging;
