//! Turning an edited list into a create/update/delete batch.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::types::ResourceId;

use super::Resource;
use super::validate::{Validate, at_index};

/// One row of an edited list: an existing record (with id) or a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<I> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(flatten)]
    pub input: I,
}

impl<I> Entry<I> {
    /// A row that will be created.
    pub fn new(input: I) -> Self {
        Self { id: None, input }
    }

    /// A row that will update record `id`.
    pub fn existing(id: ResourceId, input: I) -> Self {
        Self {
            id: Some(id),
            input,
        }
    }

    /// The editable row for a fetched record.
    pub fn from_resource<R>(resource: &R) -> Self
    where
        R: Resource<Input = I>,
    {
        Self::existing(resource.id(), resource.to_input())
    }
}

/// The requests a list submission needs.
///
/// Original ids missing from the edited list are deleted, edited rows with
/// an id are updated, and rows without one are created.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan<I> {
    pub deletes: Vec<ResourceId>,
    pub updates: Vec<(ResourceId, I)>,
    pub creates: Vec<I>,
}

impl<I: Validate> SyncPlan<I> {
    /// Validate every edited row and compute the batch.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid row, or if two rows claim the same id.
    /// Nothing should be sent when this fails.
    pub fn compute<R>(original: &[R], edited: Vec<Entry<I>>) -> Result<Self, InvalidInputError>
    where
        R: Resource<Input = I>,
    {
        let mut seen = HashSet::new();
        for (index, entry) in edited.iter().enumerate() {
            entry
                .input
                .validate()
                .map_err(|e| at_index(e, R::LIST_NAME, index))?;
            if let Some(id) = entry.id
                && !seen.insert(id)
            {
                return Err(InvalidInputError::field(
                    format!("{}[{}].id", R::LIST_NAME, index),
                    format!("id {} appears more than once", id),
                ));
            }
        }

        let deletes = original
            .iter()
            .map(Resource::id)
            .filter(|id| !seen.contains(id))
            .collect();

        let mut updates = Vec::new();
        let mut creates = Vec::new();
        for entry in edited {
            match entry.id {
                Some(id) => updates.push((id, entry.input)),
                None => creates.push(entry.input),
            }
        }

        Ok(Self {
            deletes,
            updates,
            creates,
        })
    }

    /// Number of requests the batch will send.
    pub fn len(&self) -> usize {
        self.deletes.len() + self.updates.len() + self.creates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Skill, SkillInput};

    fn skill(id: u64, name: &str) -> Skill {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "proficiency": 3
        }))
        .unwrap()
    }

    fn input(name: &str, proficiency: u8) -> SkillInput {
        SkillInput {
            name: name.to_string(),
            proficiency,
            category: None,
        }
    }

    #[test]
    fn removed_rows_are_deleted_and_new_rows_created() {
        let original = vec![skill(1, "Rust"), skill(2, "Go"), skill(3, "Zig")];
        let edited = vec![
            Entry::existing(ResourceId::new(1), input("Rust", 5)),
            Entry::new(input("SQL", 4)),
            Entry::existing(ResourceId::new(3), input("Zig", 2)),
        ];

        let plan = SyncPlan::compute(&original, edited).unwrap();

        assert_eq!(plan.deletes, vec![ResourceId::new(2)]);
        assert_eq!(
            plan.updates,
            vec![
                (ResourceId::new(1), input("Rust", 5)),
                (ResourceId::new(3), input("Zig", 2)),
            ]
        );
        assert_eq!(plan.creates, vec![input("SQL", 4)]);
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn empty_edit_deletes_everything() {
        let original = vec![skill(1, "Rust"), skill(2, "Go")];
        let plan = SyncPlan::<SkillInput>::compute(&original, Vec::new()).unwrap();
        assert_eq!(plan.deletes, vec![ResourceId::new(1), ResourceId::new(2)]);
        assert!(plan.updates.is_empty());
        assert!(plan.creates.is_empty());
    }

    #[test]
    fn invalid_row_rejects_whole_batch() {
        let original = vec![skill(1, "Rust")];
        let edited = vec![
            Entry::existing(ResourceId::new(1), input("Rust", 5)),
            Entry::new(input("", 3)),
        ];

        let err = SyncPlan::compute(&original, edited).unwrap_err();
        assert_eq!(err.to_string(), "skills[1].name: Skill name is required");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let original = vec![skill(1, "Rust")];
        let edited = vec![
            Entry::existing(ResourceId::new(1), input("Rust", 5)),
            Entry::existing(ResourceId::new(1), input("Rust again", 4)),
        ];
        assert!(SyncPlan::compute(&original, edited).is_err());
    }

    #[test]
    fn entry_round_trips_with_flattened_input() {
        let entry = Entry::existing(ResourceId::new(7), input("Rust", 5));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "name": "Rust", "proficiency": 5})
        );
        let back: Entry<SkillInput> = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
