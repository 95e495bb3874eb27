use crate::{
    cli::{
        Menu, display_row,
        command::{Cli, Commands, build_update},
    },
    prelude::{AppError, Contact, ContactBook, JsonStorage},
};
use clap::Parser;
use dotenv::dotenv;
use std::io;
use tracing::debug;

pub fn run_app() -> Result<(), AppError> {
    // Settings may come from a .env file in the working directory
    dotenv().ok();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let storage = JsonStorage::new(&cli.file);
    let mut book = ContactBook::open(Box::new(storage), cli.policy())?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Add {
            name,
            phone,
            email,
            address,
        } => {
            let new_contact = Contact::new(
                &name,
                &phone,
                &email.unwrap_or_default(),
                &address.unwrap_or_default(),
            )?;

            book.add(new_contact)?;

            println!("Contact added successfully");
            Ok(())
        }

        // Listing contacts
        Commands::List => {
            if book.is_empty() {
                println!("No contacts saved.");
                return Ok(());
            }

            for (i, c) in book.contacts().iter().enumerate() {
                println!("{}", display_row(i + 1, c));
            }
            Ok(())
        }

        Commands::Search { query } => {
            let mut hits = book.search(&query)?.with_positions().peekable();

            if hits.peek().is_none() {
                println!("No matches found.");
                return Ok(());
            }

            for (pos, c) in hits {
                println!("{}", display_row(pos, c));
            }
            Ok(())
        }

        Commands::Update {
            target,
            new_name,
            new_phone,
            new_email,
            new_address,
        } => {
            let update = build_update(new_name, new_phone, new_email, new_address);

            match book.update(&target.selector(), update) {
                Ok(_) => {
                    println!("Contact updated successfully");
                    Ok(())
                }
                Err(AppError::NotFound(item)) => {
                    eprintln!("{}", AppError::NotFound(item));
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }

        Commands::Delete { target } => match book.delete(&target.selector()) {
            Ok(_) => {
                println!("Contact deleted successfully");
                Ok(())
            }
            Err(AppError::NotFound(item)) => {
                eprintln!("{}", AppError::NotFound(item));
                Ok(())
            }
            Err(e) => Err(e),
        },

        // Import contacts into storage from .csv file
        Commands::Import { src } => {
            let report = book.import_csv(&src)?;

            println!(
                "Successfully imported {} contacts from {:?}.",
                report.imported, report.path
            );
            if report.skipped > 0 {
                println!("Skipped {} invalid rows.", report.skipped);
            }
            Ok(())
        }

        Commands::Export { des } => {
            let (path, total) = book.export_csv(&des)?;

            println!("Successfully exported {} contacts to {:?}.", total, path);
            Ok(())
        }

        Commands::Menu => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Menu::new(&mut book, stdin.lock(), stdout.lock()).run()
        }
    }
}
