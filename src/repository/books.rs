//! Book table: records kept sorted by ID, plus a lowercase title index

use std::collections::HashMap;

use indexmap::IndexMap;

use super::flatfile::FlatFile;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookId},
};

/// In-memory book table backed by `book_id,title,author,quantity` lines
#[derive(Debug)]
pub struct BooksRepository {
    file: FlatFile,
    /// Ascending by `id`; looked up with binary search
    books: Vec<Book>,
    /// Lowercased title -> ID of the first record carrying it
    titles: HashMap<String, BookId>,
    /// Highest ID ever handed out or loaded
    last_id: BookId,
}

impl BooksRepository {
    /// Load the table from `file`
    pub fn load(file: FlatFile) -> AppResult<Self> {
        // Later lines for the same ID replace earlier ones
        let mut by_id: IndexMap<BookId, Book> = IndexMap::new();
        for (line_no, line) in file.read_lines()? {
            let book = Self::parse_line(&file, line_no, &line)?;
            by_id.insert(book.id, book);
        }

        let mut titles = HashMap::with_capacity(by_id.len());
        for book in by_id.values() {
            titles.entry(book.title.to_lowercase()).or_insert(book.id);
        }

        let mut books: Vec<Book> = by_id.into_values().collect();
        books.sort_by_key(|b| b.id);
        let last_id = books.last().map(|b| b.id).unwrap_or(0);

        tracing::info!("Loaded {} books from {:?}", books.len(), file.path());

        Ok(Self {
            file,
            books,
            titles,
            last_id,
        })
    }

    /// Rewrite the whole table file
    pub fn save(&self) -> AppResult<()> {
        self.file
            .write_lines(self.books.iter().map(Self::to_line))?;
        Ok(())
    }

    pub fn file(&self) -> &FlatFile {
        &self.file
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// ID the next inserted record will receive
    pub fn next_id(&self) -> BookId {
        self.last_id.saturating_add(1)
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.books.binary_search_by_key(&id, |b| b.id).ok()
    }

    /// Binary search for a book by ID
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.position(id).map(|idx| &self.books[idx])
    }

    pub fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.position(id).map(move |idx| &mut self.books[idx])
    }

    /// Case-insensitive lookup of an existing title
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        self.titles
            .get(&title.to_lowercase())
            .and_then(|id| self.get(*id))
    }

    /// Insert a new record under the next unused ID
    pub fn insert(&mut self, title: String, author: String, quantity: u32) -> AppResult<&Book> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::Conflict("Book identifiers exhausted".to_string()))?;

        self.titles.entry(title.to_lowercase()).or_insert(id);
        self.last_id = id;
        // New IDs are above every existing one, so pushing keeps the order
        self.books.push(Book {
            id,
            title,
            author,
            quantity,
        });
        Ok(&self.books[self.books.len() - 1])
    }

    /// Delete a record, returning it
    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let idx = self.position(id)?;
        let book = self.books.remove(idx);

        let key = book.title.to_lowercase();
        if self.titles.get(&key) == Some(&id) {
            self.titles.remove(&key);
            // Older data may hold the same title twice; keep the survivor findable
            if let Some(other) = self.books.iter().find(|b| b.title.to_lowercase() == key) {
                self.titles.insert(key, other.id);
            }
        }
        Some(book)
    }

    /// All records in ascending ID order
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    fn to_line(book: &Book) -> String {
        format!("{},{},{},{}", book.id, book.title, book.author, book.quantity)
    }

    fn parse_line(file: &FlatFile, line_no: usize, line: &str) -> AppResult<Book> {
        let fields: Vec<&str> = line.split(',').collect();
        let [id, title, author, quantity] = fields.as_slice() else {
            return Err(file.format_error(
                line_no,
                format!("expected 4 fields, found {}", fields.len()),
            ));
        };

        let id = id
            .parse::<BookId>()
            .map_err(|e| file.format_error(line_no, format!("invalid book id '{}': {}", id, e)))?;
        let quantity = quantity.parse::<u32>().map_err(|e| {
            file.format_error(line_no, format!("invalid quantity '{}': {}", quantity, e))
        })?;

        Ok(Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            quantity,
        })
    }
}
