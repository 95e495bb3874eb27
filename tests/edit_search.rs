use assert_cmd::Command;
use predicates::str::contains;
use std::path::Path;
use tempfile::tempdir;

fn book(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("--file").arg(file);
    cmd
}

#[test]
fn edit_search() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("contacts.json");

    book(&file)
        .args([
            "add",
            "--name",
            "Alice",
            "--phone",
            "555-1111",
            "--email",
            "a@x.com",
            "--address",
            "1 Main St",
        ])
        .assert()
        .success()
        .stdout(contains("Contact added successfully"));

    // Search by a portion of the name (should find the contact)
    book(&file)
        .args(["search", "ali"])
        .assert()
        .success()
        .stdout(contains("  1. Alice"));

    // Edit the contact (change phone)
    book(&file)
        .args(["update", "--name", "Alice", "--new-phone", "555-2222"])
        .assert()
        .success()
        .stdout(contains("Contact updated successfully"));

    book(&file)
        .args(["search", "Alice"])
        .assert()
        .success()
        .stdout(contains("555-2222"))
        .stdout(contains("a@x.com"));

    // Updating a missing contact is reported, not fatal
    book(&file)
        .args(["update", "--name", "Bob", "--new-phone", "555-3333"])
        .assert()
        .success()
        .stderr(contains("Contact 'Bob' Not found"));

    // Invalid new value is refused
    book(&file)
        .args(["update", "--name", "Alice", "--new-email", "broken"])
        .assert()
        .failure()
        .stderr(contains("Validation failed"));

    book(&file)
        .args(["delete", "--name", "Alice"])
        .assert()
        .success()
        .stdout(contains("Contact deleted successfully"));

    book(&file)
        .args(["search", "Alice"])
        .assert()
        .success()
        .stdout(contains("No matches found."));

    Ok(())
}

#[test]
fn search_policies() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("contacts.json");

    book(&file)
        .args(["add", "--name", "Bob Stone", "--phone", "0803 123 4567"])
        .assert()
        .success();

    book(&file)
        .args(["search", "bob", "--case-sensitive"])
        .assert()
        .success()
        .stdout(contains("No matches found."));

    book(&file)
        .args(["search", "123 45"])
        .assert()
        .success()
        .stdout(contains("No matches found."));

    book(&file)
        .args(["search", "123 45"])
        .env("CONTACT_BOOK_MATCH_PHONE", "true")
        .assert()
        .success()
        .stdout(contains("Bob Stone"));

    Ok(())
}
