//! # Sign-up and sign-in form validation
//!
//! Runs before any request is sent. The sign-up form is validated in two
//! steps, matching the two pages of the form:
//!
//! | Step | Field | Rule |
//! |------|-------|------|
//! | 1 | `name` | required, at least 6 characters after trimming |
//! | 1 | `email` | required, shaped `local@domain.tld` |
//! | 2 | `password` | required, at least 8 characters, [`password_strength`] ≥ 3 |
//! | 2 | `confirmPassword` | equal to `password` |
//! | 2 | `age` | required (non-zero), between 13 and 120 |

use std::collections::BTreeMap;

use store::{SignInData, SignUpData};

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";
pub const AGE: &str = "age";

const MIN_NAME_LEN: usize = 6;
const MIN_PASSWORD_LEN: usize = 8;
const MIN_PASSWORD_STRENGTH: u8 = 3;
const MIN_AGE: u32 = 13;
const MAX_AGE: u32 = 120;

/// Field name to message. At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: &'static str, message: &str) {
        self.errors.entry(field).or_insert_with(|| message.to_string());
    }

    fn merge(&mut self, other: FormErrors) {
        for (field, message) in other.errors {
            self.errors.entry(field).or_insert(message);
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Score from 0 to 4: one point each for length ≥ 8, an uppercase letter, a
/// digit and a symbol. An empty password scores 0.
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    [
        password.chars().count() >= MIN_PASSWORD_LEN,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .into_iter()
    .filter(|&passed| passed)
    .count() as u8
}

/// `local@domain.tld`: no whitespace, a single `@`, and a dot inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// State of the two-step sign-up form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub age: u32,
}

impl SignUpForm {
    pub fn validate_step1(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(NAME, "Name is required");
        } else if name.chars().count() < MIN_NAME_LEN {
            errors.insert(NAME, "Name must be at least 6 characters");
        }

        if self.email.is_empty() {
            errors.insert(EMAIL, "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert(EMAIL, "Enter a valid email");
        }

        errors.into_result()
    }

    pub fn validate_step2(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.password.is_empty() {
            errors.insert(PASSWORD, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(PASSWORD, "Password must be at least 8 characters");
        } else if password_strength(&self.password) < MIN_PASSWORD_STRENGTH {
            errors.insert(PASSWORD, "Password is too weak (e.g. pa$worD1)");
        }

        if self.password != self.confirm_password {
            errors.insert(CONFIRM_PASSWORD, "Passwords do not match");
        }

        if self.age == 0 {
            errors.insert(AGE, "Age is required");
        } else if self.age < MIN_AGE {
            errors.insert(AGE, "You must be at least 13 years old");
        } else if self.age > MAX_AGE {
            errors.insert(AGE, "Enter a valid age");
        }

        errors.into_result()
    }

    /// Both steps, all errors reported together.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if let Err(step1) = self.validate_step1() {
            errors.merge(step1);
        }
        if let Err(step2) = self.validate_step2() {
            errors.merge(step2);
        }
        errors.into_result()
    }

    /// Validate and produce the request body.
    pub fn to_sign_up_data(&self) -> Result<SignUpData, FormErrors> {
        self.validate()?;
        Ok(SignUpData {
            name: self.name.trim().to_string(),
            email: self.email.clone(),
            password: self.password.clone(),
            age: self.age,
        })
    }
}

pub fn validate_sign_in(data: &SignInData) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    if data.email.trim().is_empty() {
        errors.insert(EMAIL, "Email is required");
    }
    if data.password.is_empty() {
        errors.insert(PASSWORD, "Password is required");
    }
    errors.into_result()
}
