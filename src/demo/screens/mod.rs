//! Demo screens

pub mod customers;
pub mod signup;

pub use customers::CustomersScreen;
pub use signup::SignupScreen;
