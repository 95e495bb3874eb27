use std::io::{BufRead, Write};

use tracing::debug;

use super::{display_contact, display_row, prompt};
use crate::domain::contact::{ValidationReq, validate_email, validate_name, validate_phone};
use crate::domain::{Contact, ContactBook, ContactUpdate, Selector};
use crate::errors::AppError;

const GO_BACK: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    AddContact,
    ListContacts,
    SearchContacts,
    UpdateContact,
    DeleteContact,
    Exit,
}

pub fn parse_command(action: &str) -> Result<MenuCommand, AppError> {
    match action.trim() {
        "1" => Ok(MenuCommand::AddContact),
        "2" => Ok(MenuCommand::ListContacts),
        "3" => Ok(MenuCommand::SearchContacts),
        "4" => Ok(MenuCommand::UpdateContact),
        "5" => Ok(MenuCommand::DeleteContact),
        "6" => Ok(MenuCommand::Exit),
        other => Err(AppError::ParseCommand(other.to_string())),
    }
}

/// The interactive session. Non-fatal errors are printed and the menu is
/// shown again; the session ends on Exit, end of input, or a fatal error.
pub struct Menu<'b, R, W> {
    book: &'b mut ContactBook,
    input: R,
    out: W,
}

impl<'b, R: BufRead, W: Write> Menu<'b, R, W> {
    pub fn new(book: &'b mut ContactBook, input: R, out: W) -> Self {
        Self { book, input, out }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        writeln!(self.out, "\n--- Contact BOOK ---")?;

        loop {
            self.show_menu()?;

            let Some(action) = super::get_input(&mut self.input)? else {
                break;
            };

            let outcome = match parse_command(&action) {
                Ok(MenuCommand::Exit) => break,
                Ok(command) => {
                    debug!(?command, "menu command");
                    self.dispatch(command)
                }
                Err(e) => Err(e),
            };

            if let Err(e) = outcome {
                if e.is_fatal() {
                    return Err(e);
                }
                writeln!(self.out, "{e}")?;
            }
        }

        writeln!(self.out, "\nBye!")?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<(), AppError> {
        writeln!(self.out)?;
        writeln!(self.out, "1. Add Contact")?;
        writeln!(self.out, "2. View Contact List")?;
        writeln!(self.out, "3. Search Contact")?;
        writeln!(self.out, "4. Update Contact")?;
        writeln!(self.out, "5. Delete Contact")?;
        writeln!(self.out, "6. Exit")?;
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, command: MenuCommand) -> Result<(), AppError> {
        match command {
            MenuCommand::AddContact => self.add(),
            MenuCommand::ListContacts => self.list(),
            MenuCommand::SearchContacts => self.search(),
            MenuCommand::UpdateContact => self.update(),
            MenuCommand::DeleteContact => self.delete(),
            MenuCommand::Exit => Ok(()),
        }
    }

    fn ask(&mut self, message: &str) -> Result<Option<String>, AppError> {
        match prompt(&mut self.input, &mut self.out, message)? {
            Some(answer) if answer == GO_BACK => Ok(None),
            answer => Ok(answer),
        }
    }

    /// Asks until `valid` accepts the answer. Blank keeps `current` when given.
    fn ask_field<F>(
        &mut self,
        label: &str,
        current: Option<&str>,
        requirement: String,
        valid: F,
    ) -> Result<Option<String>, AppError>
    where
        F: Fn(&str) -> Result<bool, AppError>,
    {
        let message = match current {
            Some(value) => format!("{label} [{value}]: "),
            None => format!("{label}: "),
        };

        loop {
            let Some(answer) = self.ask(&message)? else {
                return Ok(None);
            };
            let answer = match current {
                Some(value) if answer.is_empty() => value.to_string(),
                _ => answer,
            };

            if valid(&answer)? {
                return Ok(Some(answer));
            }
            writeln!(self.out, "{}", AppError::Validation(requirement.clone()))?;
        }
    }

    /// Prompts for all four fields. `None` means the user went back.
    fn prompt_contact(&mut self, existing: Option<&Contact>) -> Result<Option<Contact>, AppError> {
        let Some(name) = self.ask_field(
            "Name",
            existing.map(|c| c.name.as_str()),
            ValidationReq::name_req(),
            |s| Ok(validate_name(s)),
        )?
        else {
            return Ok(None);
        };

        let Some(phone) = self.ask_field(
            "Phone",
            existing.map(|c| c.phone.as_str()),
            ValidationReq::phone_req(),
            validate_phone,
        )?
        else {
            return Ok(None);
        };

        let Some(email) = self.ask_field(
            "Email",
            existing.map(|c| c.email.as_str()),
            ValidationReq::email_req(),
            validate_email,
        )?
        else {
            return Ok(None);
        };

        let Some(address) = self.ask_field(
            "Address",
            existing.map(|c| c.address.as_str()),
            String::new(),
            |_| Ok(true),
        )?
        else {
            return Ok(None);
        };

        Contact::new(&name, &phone, &email, &address).map(Some)
    }

    fn add(&mut self) -> Result<(), AppError> {
        writeln!(self.out, "\n--- Add Contact ({GO_BACK} to go back) ---")?;

        let Some(contact) = self.prompt_contact(None)? else {
            return Ok(());
        };

        let added = self.book.add(contact)?;
        writeln!(self.out, "Contact '{}' added.", added.name)?;
        Ok(())
    }

    fn list(&mut self) -> Result<(), AppError> {
        writeln!(self.out, "\n--- Contact List ---")?;

        if self.book.is_empty() {
            writeln!(self.out, "No contacts saved.")?;
            return Ok(());
        }

        for (i, contact) in self.book.contacts().iter().enumerate() {
            writeln!(self.out, "\n{}. {}", i + 1, display_contact(contact))?;
        }
        Ok(())
    }

    /// Prints the hits for a query and returns their positions.
    fn show_hits(&mut self, term: &str) -> Result<Vec<usize>, AppError> {
        let hits: Vec<(usize, String)> = self
            .book
            .search(term)?
            .with_positions()
            .map(|(pos, c)| (pos, display_row(pos, c)))
            .collect();

        if hits.is_empty() {
            writeln!(self.out, "No matches found.")?;
        }
        for (rank, (_, row)) in hits.iter().enumerate() {
            writeln!(self.out, "[{}] {}", rank + 1, row)?;
        }
        Ok(hits.into_iter().map(|(pos, _)| pos).collect())
    }

    fn search(&mut self) -> Result<(), AppError> {
        let Some(term) = self.ask("Enter name to search: ")? else {
            return Ok(());
        };
        self.show_hits(&term)?;
        Ok(())
    }

    /// Search, then let the user pick one of the hits by its number in
    /// brackets or by its book position.
    fn select(&mut self, action: &str) -> Result<Option<usize>, AppError> {
        let Some(term) = self.ask(&format!("Search contact to {action}: "))? else {
            return Ok(None);
        };

        let hits = self.show_hits(&term)?;
        if hits.is_empty() {
            return Ok(None);
        }
        if hits.len() == 1 {
            return Ok(Some(hits[0]));
        }

        let Some(choice) = self.ask(&format!("Which contact to {action}? "))? else {
            return Ok(None);
        };
        if choice.is_empty() {
            writeln!(self.out, "Canceled.")?;
            return Ok(None);
        }

        let number: usize = choice.parse()?;
        match hits.get(number.wrapping_sub(1)) {
            Some(pos) => Ok(Some(*pos)),
            None if hits.contains(&number) => Ok(Some(number)),
            None => Err(AppError::NotFound(format!("Result {number}"))),
        }
    }

    fn update(&mut self) -> Result<(), AppError> {
        writeln!(self.out, "\n--- Update Contact ({GO_BACK} to go back) ---")?;

        let Some(position) = self.select("update")? else {
            return Ok(());
        };

        let current = self.book.contacts()[position - 1].clone();
        writeln!(self.out, "Enter new values (leave blank to keep current):")?;
        let Some(edited) = self.prompt_contact(Some(&current))? else {
            return Ok(());
        };

        let update = ContactUpdate {
            name: Some(edited.name),
            phone: Some(edited.phone),
            email: Some(edited.email),
            address: Some(edited.address),
        };
        let updated = self.book.update(&Selector::Position(position), update)?;
        writeln!(self.out, "Contact updated: {}", updated.name)?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), AppError> {
        writeln!(self.out, "\n--- Delete Contact ({GO_BACK} to go back) ---")?;

        let Some(position) = self.select("delete")? else {
            return Ok(());
        };

        let name = self.book.contacts()[position - 1].name.clone();
        let consent = self.ask(&format!("Are you sure you want to delete '{name}'? (y/n): "))?;
        if !consent.is_some_and(|c| c.eq_ignore_ascii_case("y")) {
            writeln!(self.out, "Deletion canceled.")?;
            return Ok(());
        }

        let removed = self.book.delete(&Selector::Position(position))?;
        writeln!(self.out, "Deleted contact: {}", removed.name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchPolicy;
    use crate::storage::MemStorage;
    use std::io::Cursor;

    fn book_with(contacts: Vec<Contact>) -> ContactBook {
        ContactBook::open(
            Box::new(MemStorage::with_contacts(contacts)),
            MatchPolicy::default(),
        )
        .unwrap()
    }

    fn run(book: &mut ContactBook, script: &str) -> Result<String, AppError> {
        let mut out = Vec::new();
        Menu::new(book, Cursor::new(script.to_string()), &mut out).run()?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn alice() -> Contact {
        Contact::new("Alice", "555-1111", "a@x.com", "1 Main St").unwrap()
    }

    #[test]
    fn parses_menu_choices() {
        assert_eq!(parse_command("1").unwrap(), MenuCommand::AddContact);
        assert_eq!(parse_command(" 6 ").unwrap(), MenuCommand::Exit);
        assert!(matches!(parse_command("9"), Err(AppError::ParseCommand(_))));
    }

    #[test]
    fn add_reprompts_invalid_fields() -> Result<(), AppError> {
        let mut book = book_with(Vec::new());

        let output = run(
            &mut book,
            "1\n\nAlice\n123\n555-1111\nnot-an-email\na@x.com\n1 Main St\n6\n",
        )?;

        assert!(output.contains("Validation failed: Name must not be empty"));
        assert!(output.contains("Validation failed: Phone must not be empty"));
        assert!(output.contains("Validation failed: Email can be empty"));
        assert!(output.contains("Contact 'Alice' added."));
        assert!(output.ends_with("Bye!\n"));
        assert_eq!(book.contacts(), &[alice()]);
        Ok(())
    }

    #[test]
    fn go_back_cancels_add() -> Result<(), AppError> {
        let mut book = book_with(Vec::new());

        run(&mut book, "1\nAlice\n*\n6\n")?;

        assert!(book.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_choice_keeps_looping() -> Result<(), AppError> {
        let mut book = book_with(Vec::new());

        let output = run(&mut book, "7\n2\n")?;

        assert!(output.contains("Unrecognized command: '7'"));
        assert!(output.contains("No contacts saved."));
        Ok(())
    }

    #[test]
    fn update_keeps_blank_fields() -> Result<(), AppError> {
        let mut book = book_with(vec![alice()]);

        let output = run(&mut book, "4\nali\n\n555-2222\n\n\n6\n")?;

        assert!(output.contains("Contact updated: Alice"));
        assert_eq!(book.contacts()[0].phone, "555-2222");
        assert_eq!(book.contacts()[0].email, "a@x.com");
        Ok(())
    }

    #[test]
    fn delete_picks_among_duplicates_and_confirms() -> Result<(), AppError> {
        let other = Contact::new("Alice", "555-9999", "", "").unwrap();
        let mut book = book_with(vec![alice(), other]);

        // declined first, then accepted
        run(&mut book, "5\nalice\n2\nn\n5\nalice\n2\ny\n6\n")?;

        assert_eq!(book.contacts(), &[alice()]);
        Ok(())
    }

    #[test]
    fn search_reports_no_matches() -> Result<(), AppError> {
        let mut book = book_with(vec![alice()]);

        let output = run(&mut book, "3\nzed\n3\nALI\n")?;

        assert!(output.contains("No matches found."));
        assert!(output.contains("[1]   1. Alice"));
        Ok(())
    }

    #[test]
    fn bad_selection_is_not_fatal() -> Result<(), AppError> {
        let other = Contact::new("Alice", "555-9999", "", "").unwrap();
        let mut book = book_with(vec![alice(), other]);

        let output = run(&mut book, "5\nalice\nx\n5\nalice\n9\n6\n")?;

        assert!(output.contains("Invalid number format"));
        assert!(output.contains("Result 9 Not found"));
        assert_eq!(book.len(), 2);
        Ok(())
    }
}
