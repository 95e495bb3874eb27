use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{ContactUpdate, MatchPolicy, Selector};
use crate::storage::stores::DEFAULT_JSON_PATH;

#[derive(Parser, Debug)]
#[command(name = "contact-book", version, about = "Simple Contact Book")]
pub struct Cli {
    /// JSON file holding the contact list
    #[arg(long, global = true, env = "CONTACT_BOOK_FILE", default_value = DEFAULT_JSON_PATH)]
    pub file: PathBuf,

    /// Match search terms with exact case
    #[arg(long, global = true, env = "CONTACT_BOOK_CASE_SENSITIVE")]
    pub case_sensitive: bool,

    /// Also match search terms against phone numbers
    #[arg(long, global = true, env = "CONTACT_BOOK_MATCH_PHONE")]
    pub match_phone: bool,

    /// Interactive menu is used when no subcommand is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn policy(&self) -> MatchPolicy {
        MatchPolicy {
            case_sensitive: self.case_sensitive,
            match_phone: self.match_phone,
        }
    }
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Contact email address
        #[arg(long)]
        email: Option<String>,

        /// Contact postal address
        #[arg(long)]
        address: Option<String>,
    },
    /// List every contact
    List,
    /// Search contacts by (part of) their name
    Search {
        /// Text to look for
        query: String,
    },
    /// Change the fields of an existing contact
    Update {
        #[command(flatten)]
        target: Target,

        /// Update name
        #[arg(long)]
        new_name: Option<String>,

        /// Update phone number
        #[arg(long)]
        new_phone: Option<String>,

        /// Update email address
        #[arg(long)]
        new_email: Option<String>,

        /// Update postal address
        #[arg(long)]
        new_address: Option<String>,
    },
    /// Delete a contact
    Delete {
        #[command(flatten)]
        target: Target,
    },
    /// Import contacts from a .csv file
    Import {
        /// Source .csv file
        src: PathBuf,
    },
    /// Export contacts to a .csv file
    Export {
        /// Destination .csv file or directory
        des: PathBuf,
    },
    /// Interactive menu
    Menu,
}

/// Which contact an update or delete applies to
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Target {
    /// Contact name (first match when several share it)
    #[arg(long)]
    pub name: Option<String>,

    /// Position as shown by `list` or `search`
    #[arg(long)]
    pub position: Option<usize>,
}

impl Target {
    pub fn selector(&self) -> Selector {
        match (&self.name, self.position) {
            (_, Some(pos)) => Selector::Position(pos),
            (Some(name), None) => Selector::Name(name.clone()),
            (None, None) => Selector::Position(0),
        }
    }
}

pub fn build_update(
    new_name: Option<String>,
    new_phone: Option<String>,
    new_email: Option<String>,
    new_address: Option<String>,
) -> ContactUpdate {
    ContactUpdate {
        name: new_name,
        phone: new_phone,
        email: new_email,
        address: new_address,
    }
}
