//! UIコンポーネントモジュール

pub mod data_table;
pub mod toast;

pub use toast::ToastHost;
