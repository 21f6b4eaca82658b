//! Student table keyed by student ID

use indexmap::IndexMap;

use super::flatfile::FlatFile;
use crate::{error::AppResult, models::student::Student};

/// In-memory student table backed by `name,student_id` lines
#[derive(Debug)]
pub struct StudentsRepository {
    file: FlatFile,
    /// Insertion ordered, which is also the order lines are written in
    students: IndexMap<String, Student>,
}

impl StudentsRepository {
    pub fn load(file: FlatFile) -> AppResult<Self> {
        let mut students = IndexMap::new();
        for (line_no, line) in file.read_lines()? {
            if !line.contains(',') {
                tracing::warn!(
                    "Ignoring line {} in {}: no separator in '{}'",
                    line_no,
                    file.name(),
                    line
                );
                continue;
            }
            let student = Self::parse_line(&file, line_no, &line)?;
            students.insert(student.id.clone(), student);
        }

        tracing::info!("Loaded {} students from {:?}", students.len(), file.path());

        Ok(Self { file, students })
    }

    pub fn save(&self) -> AppResult<()> {
        self.file
            .write_lines(self.students.values().map(Self::to_line))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.students.contains_key(id)
    }

    /// Insert a student; the caller has checked the ID is free
    pub fn insert(&mut self, student: Student) {
        self.students.insert(student.id.clone(), student);
    }

    pub fn remove(&mut self, id: &str) -> Option<Student> {
        self.students.shift_remove(id)
    }

    /// Students whose name matches `name` ignoring case, in name-sorted order.
    ///
    /// Sorts a snapshot by lowercase name, binary-searches one match, then
    /// widens to the full run of equal names on both sides.
    pub fn find_by_name(&self, name: &str) -> Vec<&Student> {
        let needle = name.to_lowercase();

        let mut sorted: Vec<(String, &Student)> = self
            .students
            .values()
            .map(|s| (s.name.to_lowercase(), s))
            .collect();
        // Stable, so equal names keep insertion order
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let Ok(hit) = sorted.binary_search_by(|(lower, _)| lower.as_str().cmp(needle.as_str()))
        else {
            return Vec::new();
        };

        let mut start = hit;
        while start > 0 && sorted[start - 1].0 == needle {
            start -= 1;
        }
        let mut end = hit;
        while end + 1 < sorted.len() && sorted[end + 1].0 == needle {
            end += 1;
        }

        sorted[start..=end].iter().map(|(_, s)| *s).collect()
    }

    /// All students in ascending (lexicographic) ID order
    pub fn sorted_by_id(&self) -> Vec<&Student> {
        let mut students: Vec<&Student> = self.students.values().collect();
        students.sort_by(|a, b| a.id.cmp(&b.id));
        students
    }

    fn to_line(student: &Student) -> String {
        format!("{},{}", student.name, student.id)
    }

    fn parse_line(file: &FlatFile, line_no: usize, line: &str) -> AppResult<Student> {
        let fields: Vec<&str> = line.split(',').collect();
        match fields.as_slice() {
            [name, id] => Ok(Student {
                id: id.to_string(),
                name: name.to_string(),
            }),
            _ => Err(file.format_error(
                line_no,
                format!("expected 2 fields, found {}", fields.len()),
            )),
        }
    }
}
