//! Employee cross-reference resolution.
//!
//! Reports show people by name while records only carry their ids. A
//! dangling id must never abort an export, so lookups fall back to fixed
//! placeholder labels.

use std::collections::HashMap;

use crate::employee::{Employee, EmployeeId};

/// Shown when a record points at an employee that is not in the directory.
pub const UNKNOWN_LABEL: &str = "Inconnu";

/// Shown when a record has no employee reference at all.
pub const UNASSIGNED_LABEL: &str = "Non assigné";

#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    names: HashMap<EmployeeId, String>,
}

impl EmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_employees(employees: &[Employee]) -> Self {
        let names = employees
            .iter()
            .map(|employee| (employee.id, employee.full_name()))
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Resolves a required reference; a dangling id yields [`UNKNOWN_LABEL`].
    pub fn name_of(&self, id: &EmployeeId) -> String {
        match self.get(id) {
            Some(name) => name.to_string(),
            None => {
                tracing::debug!("Employee {} not found, using placeholder", id);
                UNKNOWN_LABEL.to_string()
            }
        }
    }

    /// Resolves an optional reference; `None` yields [`UNASSIGNED_LABEL`].
    pub fn display_name(&self, id: Option<&EmployeeId>) -> String {
        match id {
            Some(id) => self.name_of(id),
            None => UNASSIGNED_LABEL.to_string(),
        }
    }

    /// Joins the names of a participant list, keeping its order.
    pub fn join_names(&self, ids: &[EmployeeId], separator: &str) -> String {
        ids.iter()
            .map(|id| self.name_of(id))
            .collect::<Vec<_>>()
            .join(separator)
    }
}
