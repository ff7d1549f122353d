//! Authentication: sign-up/sign-in/sign-out calls and form validation.

mod service;
pub mod validation;

pub use validation::{password_strength, validate_sign_in, FormErrors, SignUpForm};
