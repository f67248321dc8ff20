//! Base types and error handling.
//!
//! - [`CookieError`](error::CookieError): every failure and rejection the store reports
//! - [`IoResultExt`](context::IoResultExt): path context for IO errors

pub mod context;
pub mod error;

#[cfg(test)]
mod tests;
