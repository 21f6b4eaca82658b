//! Menu transcripts driven through in-memory input and output

use elidune_store::{config::StorageConfig, menu, Library};
use tempfile::{tempdir, TempDir};

fn run_script(dir: &TempDir, script: &str) -> String {
    let mut library =
        Library::open(&StorageConfig::in_dir(dir.path())).expect("Failed to open library");
    let mut output = Vec::new();
    menu::run(&mut library, script.as_bytes(), &mut output).expect("Menu failed");
    String::from_utf8(output).expect("Menu output is not UTF-8")
}

#[test]
fn test_quit_and_end_of_input() {
    let dir = tempdir().unwrap();
    let out = run_script(&dir, "0\n");
    assert!(out.contains("Library Management System"));
    assert!(out.contains("Exiting..."));

    let out = run_script(&dir, "");
    assert!(!out.contains("Exiting..."));
}

#[test]
fn test_invalid_choice() {
    let dir = tempdir().unwrap();
    let out = run_script(&dir, "42\n0\n");
    assert!(out.contains("Invalid choice. Please enter a valid option."));
}

#[test]
fn test_add_and_search_books() {
    let dir = tempdir().unwrap();
    let script = "1\nDune\nFrank Herbert\n2\n1\ndune\nFrank Herbert\n3\n3\n1\n4\n0\n";
    let out = run_script(&dir, script);
    assert!(out.contains(
        "Book 'Dune' by Frank Herbert (ID: 1) added successfully with quantity 2."
    ));
    assert!(out.contains("Quantity of book 'Dune' by Frank Herbert (ID: 1) increased to 5."));
    assert!(out.contains("Book 'Dune' by Frank Herbert, Quantity: 5"));
    assert!(out.contains("Book ID: 1, Name: 'Dune' by Frank Herbert, Quantity: 5"));
}

#[test]
fn test_add_book_input_validation() {
    let dir = tempdir().unwrap();
    let script = "1\nDune\nR2D2\n2\n1\nDune\nHerbert\nmany\n1\nDune, Part One\nHerbert\n1\n4\n0\n";
    let out = run_script(&dir, script);
    assert!(out.contains("Author name should only contain alphabetic characters"));
    assert!(out.contains("Invalid input for quantity. Please enter a valid integer."));
    assert!(out.contains("Fields must not contain commas or line breaks"));
    assert!(out.contains("No books in the library."));
}

#[test]
fn test_remove_book_prompts_for_quantity() {
    let dir = tempdir().unwrap();
    let script = "1\nDune\nHerbert\n3\n2\n1\n5\n2\n1\n2\n2\n9\n0\n";
    let out = run_script(&dir, script);
    assert!(out.contains("Enter the quantity of 'Dune' with ID '1' to remove (currently 3): "));
    assert!(out.contains("Invalid quantity. Please enter a valid quantity."));
    assert!(out.contains("2 copies of book 'Dune' with ID '1' removed successfully."));
    assert!(out.contains("Book not found in the library."));
}

#[test]
fn test_student_commands() {
    let dir = tempdir().unwrap();
    let script = concat!(
        "5\nAlice\n1\n",
        "5\nalice\n2\n",
        "5\nBob\n3\n",
        "5\nCarol\n1\n",
        "5\nDan\nS9\n",
        "7\nALICE\n",
        "6\nBob\n3\n",
        "8\n",
        "0\n"
    );
    let out = run_script(&dir, script);
    assert!(out.contains("Student 'Alice' with ID '1' added successfully."));
    assert!(out.contains("Student with ID '1' already exists in the list with name 'Alice'."));
    assert!(out.contains("Invalid input for student ID. Please enter a valid integer."));
    assert!(out.contains(concat!(
        "Students with the name 'ALICE':\n",
        "Student Name: Alice, Student ID: 1\n",
        "Student Name: alice, Student ID: 2\n"
    )));
    assert!(out.contains("Student 'Bob' with ID '3' removed successfully."));
    assert!(out.contains(concat!(
        "Students in the database (sorted by ID):\n",
        "Name: Alice, ID: 1\n",
        "Name: alice, ID: 2\n"
    )));
}

#[test]
fn test_rental_commands() {
    let dir = tempdir().unwrap();
    let script = concat!(
        "12\n",
        "1\nDune\nHerbert\n2\n",
        "5\nAmy\n100\n",
        "5\nBen\n200\n",
        "5\nCy\n300\n",
        "9\nAmy\n100\n1\n",
        "9\nAmy\n100\n1\n",
        "9\nBen\n200\n1\n",
        "9\nCy\n300\n1\n",
        "11\n100\n",
        "12\n",
        "10\nAmy\n100\n1\n",
        "10\nAmy\n100\n1\n",
        "9\nAmy\nxyz\n1\n",
        "11\n999\n",
        "0\n"
    );
    let out = run_script(&dir, script);
    assert!(out.contains("No rentals in the database."));
    assert!(out.contains("Book 'Dune' with ID '1' rented to student 'Amy' with ID '100'."));
    assert!(out.contains("Student 'Amy' with ID '100' already has book 'Dune' with ID '1'."));
    assert!(out.contains("Book 'Dune' with ID '1' is out of stock."));
    assert!(out.contains(concat!(
        "Rentals for the student with ID '100':\n",
        "Book ID: 1, Book Title: Dune, Author: Herbert, Quantity: 0"
    )));
    assert!(out.contains("Student Name: Amy, Student ID: 100, Book ID: 1, Book Title: Dune"));
    assert!(out.contains("Student Name: Ben, Student ID: 200, Book ID: 1, Book Title: Dune"));
    assert!(out.contains("Book with ID '1' returned by student 'Amy' with ID '100'."));
    assert!(out.contains("No matching rental found for the provided student and book details."));
    assert!(out.contains("Invalid input for student ID or book ID. Please enter valid integers."));
    assert!(out.contains("No rentals found for the student with ID '999'."));
}

#[test]
fn test_generate_commands() {
    let dir = tempdir().unwrap();
    let out = run_script(&dir, "13\n5\n14\n3\n13\nfive\n0\n");
    assert!(out.contains("new books"));
    assert!(out.contains("new students"));
    assert!(out.contains("Invalid input. Please enter a valid integer."));

    let lib = Library::open(&StorageConfig::in_dir(dir.path())).unwrap();
    assert!(!lib.list_books().is_empty());
    assert!(!lib.list_students().is_empty());
}
