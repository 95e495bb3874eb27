pub use crate::cli::{command, run_app};
pub use crate::domain::{
    Contact, ContactBook, ContactUpdate, ImportReport, MatchPolicy, Matches, Selector,
    ValidationReq, contact,
};
pub use crate::errors::AppError;
pub use crate::storage::{self, ContactStore, CsvStorage, JsonStorage, MemStorage};
