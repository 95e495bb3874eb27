pub mod command;
pub mod menu;
pub mod run;

pub use menu::Menu;
pub use run::run_app;

use crate::domain::Contact;
use crate::errors::AppError;
use std::io::{BufRead, Write};

pub fn display_contact(contact: &Contact) -> String {
    format!(
        "Name:    {}\n\
        Phone:   {}\n\
        Email:   {}\n\
        Address: {}",
        contact.name, contact.phone, contact.email, contact.address
    )
}

/// One row of a listing: `  3. Alice                555-1111        a@x.com`
pub fn display_row(position: usize, contact: &Contact) -> String {
    format!(
        "{position:>3}. {:<20} {:<15} {:<30} {}",
        contact.name, contact.phone, contact.email, contact.address
    )
    .trim_end()
    .to_string()
}

// INPUT FUNCTIONS

/// Reads one trimmed line. `None` means the input is exhausted.
pub fn get_input<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<String>, AppError> {
    write!(out, "{message}")?;
    out.flush()?;
    get_input(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn input_is_trimmed_until_exhausted() -> Result<(), AppError> {
        let mut input = Cursor::new("  hello \n\nlast");

        assert_eq!(get_input(&mut input)?, Some("hello".to_string()));
        assert_eq!(get_input(&mut input)?, Some(String::new()));
        assert_eq!(get_input(&mut input)?, Some("last".to_string()));
        assert_eq!(get_input(&mut input)?, None);
        Ok(())
    }

    #[test]
    fn row_layout() -> Result<(), AppError> {
        let contact = Contact::new("Alice", "555-1111", "", "")?;

        assert_eq!(display_row(1, &contact), "  1. Alice                555-1111");
        Ok(())
    }
}
