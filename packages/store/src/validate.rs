//! # Client-side field validation
//!
//! Every check here runs at the point of entry, before any remote call. A
//! failure is reported as [`ValidationErrors`] keyed by form field and never
//! reaches a [`crate::Collection`].

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{CostFields, ItemFields};

/// Field-keyed validation messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Parse a numeric text input. Anything unparsable becomes `NaN`, which fails
/// the positive-amount check.
pub fn parse_amount(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn positive(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

pub fn validate_item(name: &str, cost: f64) -> Result<ItemFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = name.trim();
    if name.is_empty() {
        errors.add("name", "Name is required");
    }
    if !positive(cost) {
        errors.add("cost", "Cost must be greater than 0");
    }
    errors.into_result(ItemFields {
        name: name.to_string(),
        cost,
    })
}

pub fn validate_cost(description: &str, amount: f64) -> Result<CostFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let description = description.trim();
    if description.is_empty() {
        errors.add("description", "Description is required");
    }
    if !positive(amount) {
        errors.add("amount", "Amount must be greater than 0");
    }
    errors.into_result(CostFields {
        description: description.to_string(),
        amount,
    })
}

/// Loose email shape: some `x@y.z` run of non-whitespace characters.
pub fn is_email(input: &str) -> bool {
    input.char_indices().any(|(at, c)| {
        if c != '@' {
            return false;
        }
        let local_ok = input[..at]
            .chars()
            .next_back()
            .is_some_and(|p| !p.is_whitespace());
        let domain: &str = input[at + 1..]
            .split(char::is_whitespace)
            .next()
            .unwrap_or("");
        let dotted = domain
            .char_indices()
            .any(|(i, d)| d == '.' && i > 0 && i + 1 < domain.len());
        local_ok && dotted
    })
}

/// Validated sign-in input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validated sign-up input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_email(email) {
        errors.add("email", "Email is invalid");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str, min_len: usize) {
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < min_len {
        errors.add(
            "password",
            format!("Password must be at least {min_len} characters"),
        );
    }
}

pub fn validate_sign_in(
    email: &str,
    password: &str,
    min_password_len: usize,
) -> Result<Credentials, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let email = email.trim();
    check_email(&mut errors, email);
    check_password(&mut errors, password, min_password_len);
    errors.into_result(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn validate_sign_up(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    min_password_len: usize,
) -> Result<Registration, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        errors.add("name", "Name is required");
    }
    check_email(&mut errors, email);
    check_password(&mut errors, password, min_password_len);
    if confirm_password.is_empty() {
        errors.add("confirm_password", "Please confirm your password");
    } else if password != confirm_password {
        errors.add("confirm_password", "Passwords do not match");
    }
    errors.into_result(Registration {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}
