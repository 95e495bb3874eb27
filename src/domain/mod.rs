pub mod book;
pub mod contact;
pub mod search;

pub use book::{ContactBook, ImportReport, Selector};
pub use contact::{Contact, ContactUpdate, ValidationReq};
pub use search::{MatchPolicy, Matches};
