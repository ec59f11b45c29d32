//! ビューモジュール

pub mod employee_table;
pub mod list_state;

pub use employee_table::EmployeeTable;
