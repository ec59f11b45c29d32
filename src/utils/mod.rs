//! ユーティリティモジュール

pub mod api;
pub mod config;
pub mod format;
pub mod log_trace;
