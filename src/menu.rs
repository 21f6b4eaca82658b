//! Numbered-choice text menu driving a [`Library`].
//!
//! The menu only parses input, calls the store and prints what came back; it
//! holds no state of its own.

use std::io::{self, BufRead, Write};

use validator::Validate;

use crate::{
    error::AppError,
    models::{
        book::{AddBookOutcome, NewBook, RemoveBookOutcome},
        rental::{RentOutcome, ReturnOutcome},
        student::NewStudent,
    },
    services::Library,
};

const MENU: &str = "\
Library Management System
1. Add Book
2. Remove Book
3. Search Book
4. Display Books
5. Add Student
6. Delete Student
7. Search Student
8. Display Students
9. Rent Book
10. Return Book
11. Search Rentals
12. Display Rentals
13. Generate Books
14. Generate Students
0. Quit";

/// Run the menu until the user quits or input ends
pub fn run<R: BufRead, W: Write>(library: &mut Library, input: R, output: W) -> io::Result<()> {
    Menu {
        library,
        input,
        output,
    }
    .run()
}

struct Menu<'a, R, W> {
    library: &'a mut Library,
    input: R,
    output: W,
}

/// Outcome of reading one prompted value
enum Answer<T> {
    Value(T),
    /// Unparseable; the message has already been printed
    Rejected,
    /// Input is exhausted
    Eof,
}

fn is_student_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let keep_going = match choice.as_str() {
                "1" => self.add_book()?,
                "2" => self.remove_book()?,
                "3" => self.search_book()?,
                "4" => self.display_books()?,
                "5" => self.add_student()?,
                "6" => self.delete_student()?,
                "7" => self.search_student()?,
                "8" => self.display_students()?,
                "9" => self.rent_book()?,
                "10" => self.return_book()?,
                "11" => self.search_rentals()?,
                "12" => self.display_rentals()?,
                "13" => self.generate_books()?,
                "14" => self.generate_students()?,
                "0" => {
                    writeln!(self.output, "Exiting...")?;
                    false
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Please enter a valid option.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        self.output.flush()
    }

    /// Print `label` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_number<T: std::str::FromStr>(
        &mut self,
        label: &str,
        invalid: &str,
    ) -> io::Result<Answer<T>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(Answer::Eof);
        };
        match raw.parse::<T>() {
            Ok(value) => Ok(Answer::Value(value)),
            Err(_) => {
                writeln!(self.output, "{}", invalid)?;
                Ok(Answer::Rejected)
            }
        }
    }

    fn prompt_student_id(&mut self, label: &str) -> io::Result<Answer<String>> {
        let Some(id) = self.prompt(label)? else {
            return Ok(Answer::Eof);
        };
        if !is_student_id(&id) {
            writeln!(self.output, "Invalid input for student ID. Please enter a valid integer.")?;
            return Ok(Answer::Rejected);
        }
        Ok(Answer::Value(id))
    }

    fn report(&mut self, err: &AppError) -> io::Result<bool> {
        writeln!(self.output, "{}", err.message())?;
        Ok(true)
    }

    fn add_book(&mut self) -> io::Result<bool> {
        let Some(title) = self.prompt("Enter book name: ")? else {
            return Ok(false);
        };
        let Some(author) = self.prompt("Enter book author: ")? else {
            return Ok(false);
        };
        let quantity = match self.prompt_number::<u32>(
            "Enter book quantity: ",
            "Invalid input for quantity. Please enter a valid integer.",
        )? {
            Answer::Value(q) => q,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        let request = NewBook {
            title,
            author,
            quantity,
        };
        if let Err(e) = request.validate() {
            return self.report(&AppError::from(e));
        }

        match self.library.add_book(&request.title, &request.author, request.quantity) {
            Ok(AddBookOutcome::Created(book)) => writeln!(
                self.output,
                "Book '{}' by {} (ID: {}) added successfully with quantity {}.",
                book.title, book.author, book.id, book.quantity
            )?,
            Ok(AddBookOutcome::Restocked(book)) => writeln!(
                self.output,
                "Quantity of book '{}' by {} (ID: {}) increased to {}.",
                book.title, book.author, book.id, book.quantity
            )?,
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn remove_book(&mut self) -> io::Result<bool> {
        let id = match self.prompt_number::<u32>(
            "Enter book ID to remove: ",
            "Invalid input. Please enter valid Book ID (numbers).",
        )? {
            Answer::Value(id) => id,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        let (title, current) = match self.library.find_book(id) {
            Ok(book) => (book.title.clone(), book.quantity),
            Err(e) => return self.report(&e),
        };

        let label = format!(
            "Enter the quantity of '{}' with ID '{}' to remove (currently {}): ",
            title, id, current
        );
        let invalid = "Invalid quantity. Please enter a valid number.";
        let quantity = match self.prompt_number::<u32>(&label, invalid)? {
            Answer::Value(q) => q,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        match self.library.remove_book(id, quantity) {
            Ok(RemoveBookOutcome::Deleted(book)) => writeln!(
                self.output,
                "{} copies of book '{}' with ID '{}' removed successfully.",
                quantity, book.title, book.id
            )?,
            Ok(RemoveBookOutcome::Reduced { book, removed }) => writeln!(
                self.output,
                "{} copies of book '{}' with ID '{}' removed successfully.",
                removed, book.title, book.id
            )?,
            Err(AppError::InvalidQuantity(_)) => {
                writeln!(self.output, "Invalid quantity. Please enter a valid quantity.")?
            }
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn search_book(&mut self) -> io::Result<bool> {
        let id = match self.prompt_number::<u32>(
            "Enter book ID to search: ",
            "Invalid input for book ID. Please enter a valid integer.",
        )? {
            Answer::Value(id) => id,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        match self.library.find_book(id) {
            Ok(book) => writeln!(
                self.output,
                "Book '{}' by {}, Quantity: {}",
                book.title, book.author, book.quantity
            )?,
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn display_books(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Books in the library:")?;
        let books = self.library.list_books();
        if books.is_empty() {
            writeln!(self.output, "No books in the library.")?;
        }
        for book in books {
            writeln!(
                self.output,
                "Book ID: {}, Name: '{}' by {}, Quantity: {}",
                book.id, book.title, book.author, book.quantity
            )?;
        }
        Ok(true)
    }

    fn add_student(&mut self) -> io::Result<bool> {
        let Some(name) = self.prompt("Enter student name: ")? else {
            return Ok(false);
        };
        let id = match self.prompt_student_id("Enter student ID: ")? {
            Answer::Value(id) => id,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        let request = NewStudent { name, id };
        if let Err(e) = request.validate() {
            return self.report(&AppError::from(e));
        }

        match self.library.add_student(&request.name, &request.id) {
            Ok(student) => writeln!(
                self.output,
                "Student '{}' with ID '{}' added successfully.",
                student.name, student.id
            )?,
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn delete_student(&mut self) -> io::Result<bool> {
        let Some(name) = self.prompt("Enter student name: ")? else {
            return Ok(false);
        };
        let id = match self.prompt_student_id("Enter student ID: ")? {
            Answer::Value(id) => id,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        match self.library.delete_student(&name, &id) {
            Ok(student) => writeln!(
                self.output,
                "Student '{}' with ID '{}' removed successfully.",
                student.name, student.id
            )?,
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn search_student(&mut self) -> io::Result<bool> {
        let Some(name) = self.prompt("Enter student name to search: ")? else {
            return Ok(false);
        };

        match self.library.find_students_by_name(&name) {
            Ok(students) => {
                writeln!(self.output, "Students with the name '{}':", name)?;
                for student in students {
                    writeln!(
                        self.output,
                        "Student Name: {}, Student ID: {}",
                        student.name, student.id
                    )?;
                }
            }
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn display_students(&mut self) -> io::Result<bool> {
        let students = self.library.list_students();
        if students.is_empty() {
            writeln!(self.output, "No students in the database.")?;
            return Ok(true);
        }
        writeln!(self.output, "Students in the database (sorted by ID):")?;
        for student in students {
            writeln!(self.output, "Name: {}, ID: {}", student.name, student.id)?;
        }
        Ok(true)
    }

    /// Shared prompts for rent and return
    fn loan_request(&mut self, verb: &str) -> io::Result<Answer<(String, String, u32)>> {
        let Some(name) = self.prompt("Enter student name: ")? else {
            return Ok(Answer::Eof);
        };
        let Some(id) = self.prompt("Enter student ID: ")? else {
            return Ok(Answer::Eof);
        };
        let Some(book_id) = self.prompt(&format!("Enter book ID to {}: ", verb))? else {
            return Ok(Answer::Eof);
        };

        match book_id.parse::<u32>() {
            Ok(book_id) if is_student_id(&id) => Ok(Answer::Value((name, id, book_id))),
            _ => {
                writeln!(
                    self.output,
                    "Invalid input for student ID or book ID. Please enter valid integers."
                )?;
                Ok(Answer::Rejected)
            }
        }
    }

    fn rent_book(&mut self) -> io::Result<bool> {
        let (name, id, book_id) = match self.loan_request("rent")? {
            Answer::Value(request) => request,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        match self.library.rent(&name, &id, book_id) {
            Ok(RentOutcome::Rented { key, book }) => writeln!(
                self.output,
                "Book '{}' with ID '{}' rented to student '{}' with ID '{}'.",
                book.title, book.id, key.student_name, key.student_id
            )?,
            Ok(RentOutcome::AlreadyHeld { key, book }) => writeln!(
                self.output,
                "Student '{}' with ID '{}' already has book '{}' with ID '{}'.",
                key.student_name, key.student_id, book.title, book.id
            )?,
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn return_book(&mut self) -> io::Result<bool> {
        let (name, id, book_id) = match self.loan_request("return")? {
            Answer::Value(request) => request,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        match self.library.return_book(&name, &id, book_id) {
            Ok(ReturnOutcome::Restocked { key, book }) => writeln!(
                self.output,
                "Book with ID '{}' returned by student '{}' with ID '{}'.",
                book.id, key.student_name, key.student_id
            )?,
            Ok(ReturnOutcome::BookMissing { book_id, .. }) => writeln!(
                self.output,
                "Book with ID '{}' not found in the library.",
                book_id
            )?,
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn search_rentals(&mut self) -> io::Result<bool> {
        let id = match self.prompt_student_id("Enter student ID to search rentals: ")? {
            Answer::Value(id) => id,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        match self.library.rentals_for_student(&id) {
            Ok(rentals) => {
                writeln!(self.output, "Rentals for the student with ID '{}':", id)?;
                for book in rentals.books {
                    writeln!(
                        self.output,
                        "Book ID: {}, Book Title: {}, Author: {}, Quantity: {}",
                        book.book_id, book.title, book.author, book.quantity
                    )?;
                }
            }
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn display_rentals(&mut self) -> io::Result<bool> {
        if !self.library.has_rental_records() {
            writeln!(self.output, "No rentals in the database.")?;
            return Ok(true);
        }
        writeln!(self.output, "Rentals in the database:")?;
        for line in self.library.list_rentals() {
            writeln!(
                self.output,
                "Student Name: {}, Student ID: {}, Book ID: {}, Book Title: {}",
                line.student_name, line.student_id, line.book_id, line.book_title
            )?;
        }
        Ok(true)
    }

    fn generate_books(&mut self) -> io::Result<bool> {
        let count = match self.prompt_number::<usize>(
            "Enter number of books to generate: ",
            "Invalid input. Please enter a valid integer.",
        )? {
            Answer::Value(n) => n,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        match self.library.generate_books(count, &mut rand::thread_rng()) {
            Ok(summary) => writeln!(
                self.output,
                "Generated {} new books ({} existing titles restocked).",
                summary.created, summary.restocked
            )?,
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }

    fn generate_students(&mut self) -> io::Result<bool> {
        let count = match self.prompt_number::<usize>(
            "Enter number of students to generate: ",
            "Invalid input. Please enter a valid integer.",
        )? {
            Answer::Value(n) => n,
            Answer::Rejected => return Ok(true),
            Answer::Eof => return Ok(false),
        };

        match self.library.generate_students(count, &mut rand::thread_rng()) {
            Ok(summary) => writeln!(
                self.output,
                "Generated {} new students ({} duplicate IDs skipped).",
                summary.created, summary.skipped
            )?,
            Err(e) => return self.report(&e),
        }
        Ok(true)
    }
}
