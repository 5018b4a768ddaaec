use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One student row, keyed by its client-assigned serial number.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Entry {
    pub srno: i32,
    pub name: String,
    pub branch: String,
    /// Kept as text; the client only checks that it starts with an integer ≤ 99.
    pub rollno: String,
}

/// The mutable part of an entry (everything but the serial number).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct EntryFields {
    pub name: String,
    pub branch: String,
    pub rollno: String,
}

impl Entry {
    pub fn new(
        srno: i32,
        name: impl Into<String>,
        branch: impl Into<String>,
        rollno: impl Into<String>,
    ) -> Self {
        Self {
            srno,
            name: name.into(),
            branch: branch.into(),
            rollno: rollno.into(),
        }
    }

    pub fn fields(&self) -> EntryFields {
        EntryFields {
            name: self.name.clone(),
            branch: self.branch.clone(),
            rollno: self.rollno.clone(),
        }
    }

    pub fn with_fields(srno: i32, fields: EntryFields) -> Self {
        Self {
            srno,
            name: fields.name,
            branch: fields.branch,
            rollno: fields.rollno,
        }
    }
}

/// The record currently being typed into the form.
///
/// `srno` is `None` until the user has supplied a serial number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub srno: Option<i32>,
    pub name: String,
    pub branch: String,
    pub rollno: String,
}

impl EntryForm {
    /// True when every field carries something other than whitespace.
    pub fn is_complete(&self) -> bool {
        self.srno.is_some()
            && !self.name.trim().is_empty()
            && !self.branch.trim().is_empty()
            && !self.rollno.trim().is_empty()
    }

    pub fn clear(&mut self) {
        *self = EntryForm::default();
    }
}

impl From<&Entry> for EntryForm {
    fn from(entry: &Entry) -> Self {
        Self {
            srno: Some(entry.srno),
            name: entry.name.clone(),
            branch: entry.branch.clone(),
            rollno: entry.rollno.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_make_the_form_incomplete() {
        let mut form = EntryForm::from(&Entry::new(1, "Asha", "CSE", "12"));
        assert!(form.is_complete());

        form.branch = "   ".to_string();
        assert!(!form.is_complete());

        form.clear();
        assert_eq!(form, EntryForm::default());
        assert!(!form.is_complete());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let value = serde_json::to_value(Entry::new(7, "Ravi", "ECE", "42")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"srno": 7, "name": "Ravi", "branch": "ECE", "rollno": "42"})
        );
    }
}
