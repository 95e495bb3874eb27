use assert_cmd::Command;
use predicates::str::contains;
use std::{fs, path::Path};
use tempfile::tempdir;

fn book(file: &Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.arg("--file").arg(file);
    cmd
}

#[test]
fn export_import() -> Result<(), Box<dyn std::error::Error>> {
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
            "alice@example.com",
        ])
        .assert()
        .success()
        .stdout(contains("Contact added successfully"));

    // Export to a temporary CSV file
    let out_path = dir.path().join("out.csv");

    book(&file)
        .arg("export")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(contains("Successfully exported 1 contacts"));

    let exported = fs::read_to_string(&out_path)?;
    assert!(exported.starts_with("name,phone,email,address"));
    assert!(exported.contains("Alice"));

    // Import into a fresh book
    let other = dir.path().join("other.json");

    book(&other)
        .arg("import")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(contains("Successfully imported 1 contacts"));

    book(&other)
        .args(["search", "alice"])
        .assert()
        .success()
        .stdout(contains("alice@example.com"));

    Ok(())
}

#[test]
fn import_reports_skipped_rows_and_bad_paths() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("contacts.json");
    let src = dir.path().join("in.csv");
    fs::write(&src, "name,phone,email,address\nAlice,555-1111,,\n,555-2222,,\n")?;

    book(&file)
        .arg("import")
        .arg(&src)
        .assert()
        .success()
        .stdout(contains("Successfully imported 1 contacts"))
        .stdout(contains("Skipped 1 invalid rows."));

    book(&file)
        .arg("import")
        .arg(dir.path().join("missing.csv"))
        .assert()
        .failure()
        .stderr(contains("Not found"));

    book(&file)
        .arg("export")
        .arg(dir.path().join("out.txt"))
        .assert()
        .failure()
        .stderr(contains("File must be a .csv file"));

    Ok(())
}
