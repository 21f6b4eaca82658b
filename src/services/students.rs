//! Student management service

use super::Library;
use crate::{
    error::{AppError, AppResult},
    models::{ensure_storable, student::Student},
};

impl Library {
    /// Register a student under a caller-chosen ID
    pub fn add_student(&mut self, name: &str, id: &str) -> AppResult<Student> {
        let name = name.trim();
        let id = id.trim();
        ensure_storable("Student name", name)?;
        ensure_storable("Student ID", id)?;

        let students = &mut self.repository.students;
        if let Some(existing) = students.get(id) {
            return Err(AppError::Conflict(format!(
                "Student with ID '{}' already exists in the list with name '{}'.",
                id, existing.name
            )));
        }

        let student = Student {
            id: id.to_string(),
            name: name.to_string(),
        };
        students.insert(student.clone());
        students.save()?;

        tracing::info!("Student added: '{}' (id={})", student.name, student.id);
        Ok(student)
    }

    /// Delete a student, provided `name` matches the stored name for `id`
    pub fn delete_student(&mut self, name: &str, id: &str) -> AppResult<Student> {
        let name = name.trim();
        let id = id.trim();

        let students = &mut self.repository.students;
        if students.get(id).map(|s| s.name.as_str()) != Some(name) {
            return Err(AppError::student_not_found(format!(
                "Student with name '{}' and ID '{}' not found in the database.",
                name, id
            )));
        }

        let removed = students.remove(id).ok_or_else(|| {
            AppError::student_not_found(format!(
                "Student with ID '{}' not found in the database.",
                id
            ))
        })?;
        students.save()?;

        tracing::info!("Student removed: '{}' (id={})", removed.name, removed.id);
        Ok(removed)
    }

    /// Students whose name matches, ignoring case, in name order
    pub fn find_students_by_name(&self, name: &str) -> AppResult<Vec<&Student>> {
        let name = name.trim();
        let found = self.repository.students.find_by_name(name);
        tracing::debug!("Student search '{}': {} match(es)", name, found.len());
        if found.is_empty() {
            return Err(AppError::student_not_found("Student not found."));
        }
        Ok(found)
    }

    /// Every student, by ascending ID
    pub fn list_students(&self) -> Vec<&Student> {
        self.repository.students.sorted_by_id()
    }
}
