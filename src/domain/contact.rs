use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const MIN_PHONE_DIGITS: usize = 6;

/// A single entry in the contact book.
///
/// `email` and `address` are optional; an empty string means the field is
/// not set. Older files that omit either key still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

pub struct ValidationReq;

impl ValidationReq {
    pub fn name_req() -> String {
        "Name must not be empty".to_string()
    }

    pub fn phone_req() -> String {
        format!(
            "Phone must not be empty, may only contain digits, spaces, '+', '-', '.', \
            '(' and ')' and must have at least {MIN_PHONE_DIGITS} digits"
        )
    }

    pub fn email_req() -> String {
        "Email can be empty, or must look like name@example.com".to_string()
    }
}

impl Contact {
    /// Builds a contact from raw input. Fields are trimmed and validated,
    /// so a returned `Contact` always satisfies the book's invariants.
    pub fn new(name: &str, phone: &str, email: &str, address: &str) -> Result<Self, AppError> {
        let contact = Contact {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
            address: address.trim().to_string(),
        };
        contact.validate()?;
        Ok(contact)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !validate_name(&self.name) {
            return Err(AppError::Validation(ValidationReq::name_req()));
        }
        if !validate_phone(&self.phone)? {
            return Err(AppError::Validation(ValidationReq::phone_req()));
        }
        if !validate_email(&self.email)? {
            return Err(AppError::Validation(ValidationReq::email_req()));
        }
        Ok(())
    }
}

pub fn validate_name(name: &str) -> bool {
    !name.trim().is_empty()
}

pub fn validate_phone(phone: &str) -> Result<bool, AppError> {
    // Digits plus the usual separators, at least six digits in total
    let re = Regex::new(r"^[0-9+\-(). ]+$")?;
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    Ok(re.is_match(phone) && digits >= MIN_PHONE_DIGITS)
}

pub fn validate_email(email: &str) -> Result<bool, AppError> {
    // Email can be empty
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?;
    Ok(email.is_empty() || re.is_match(email))
}

/// Fields to overwrite on an existing contact. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none() && self.address.is_none()
    }

    /// Returns `current` with the supplied fields replaced. The result is
    /// validated; `current` is never touched.
    pub fn merged_with(&self, current: &Contact) -> Result<Contact, AppError> {
        let pick = |new: &Option<String>, old: &str| {
            new.as_deref().map(str::trim).unwrap_or(old).to_string()
        };

        let merged = Contact {
            name: pick(&self.name, &current.name),
            phone: pick(&self.phone, &current.phone),
            email: pick(&self.email, &current.email),
            address: pick(&self.address, &current.address),
        };
        merged.validate()?;
        Ok(merged)
    }
}
