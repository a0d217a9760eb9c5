pub mod binding;
pub mod db;
pub mod employee;
pub mod errors;
