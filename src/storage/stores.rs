use super::*;

use csv::{Reader, Writer};
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_JSON_PATH: &str = "contacts.json";
const DEFAULT_CSV_NAME: &str = "contacts.csv";

/// The persisted contact list: a pretty printed JSON array.
pub struct JsonStorage {
    pub path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ContactStore for JsonStorage {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        if !fs::exists(&self.path)? {
            debug!(path = %self.path.display(), "no contact file yet, starting empty");
            return Ok(Vec::new());
        }

        let data = fs::read(&self.path)?;

        // serde_json will give an error if data is empty
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let contacts: Vec<Contact> =
            serde_json::from_slice(&data).map_err(|e| AppError::CorruptStorage {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!(path = %self.path.display(), count = contacts.len(), "loaded contacts");
        Ok(contacts)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let mut json = serde_json::to_string_pretty(contacts)?;
        json.push('\n');

        // Write beside the target and rename so a crash never leaves half a file
        let temp = self.temp_path();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), count = contacts.len(), "saved contacts");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// CSV file with `name,phone,email,address` headers, used for import and export.
pub struct CsvStorage {
    pub path: PathBuf,
}

impl CsvStorage {
    /// A directory resolves to `contacts.csv` inside it. Anything with an
    /// extension other than `.csv` is refused.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let mut path: PathBuf = path.into();

        if path.is_dir() {
            path = path.join(DEFAULT_CSV_NAME);
        } else if path
            .extension()
            .is_some_and(|ext| !ext.eq_ignore_ascii_case("csv"))
        {
            return Err(AppError::Validation("File must be a .csv file".to_string()));
        }

        Ok(Self { path })
    }
}

impl ContactStore for CsvStorage {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        if !self.path.exists() {
            return Err(AppError::NotFound(format!("CSV file {}", self.path.display())));
        }

        let mut reader = Reader::from_path(&self.path)?;
        let mut contacts = Vec::new();
        for result in reader.deserialize() {
            let record: Contact = result?;
            contacts.push(record);
        }

        info!(path = %self.path.display(), count = contacts.len(), "read csv rows");
        Ok(contacts)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let mut writer = Writer::from_path(&self.path)?;
        if contacts.is_empty() {
            writer.write_record(["name", "phone", "email", "address"])?;
        }
        for contact in contacts {
            writer.serialize(contact)?;
        }
        writer.flush()?;

        info!(path = %self.path.display(), count = contacts.len(), "wrote csv rows");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
