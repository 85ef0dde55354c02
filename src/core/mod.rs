//! Core business logic abstractions

pub mod calculator;
pub mod config;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use calculator::Calculator;
pub use error::{CalculatorError, FetchError};
pub use rates::{RateProvider, RateQuote};
