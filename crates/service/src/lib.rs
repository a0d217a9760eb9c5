//! Service layer providing the business rules on top of the employee store.
//! - Enforces the email uniqueness rule on create.
//! - Propagates absence as `None`, never as an error.
//! - Provides clear error types for the HTTP boundary to map.

pub mod employee_service;
pub mod errors;
#[cfg(test)]
pub mod test_support;
