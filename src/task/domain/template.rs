//! Task template aggregate.

use super::{RecurrenceType, TaskDomainError, TaskTemplateId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Reusable definition of a kind of cage work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    id: TaskTemplateId,
    name: String,
    description: String,
    recurrence_type: RecurrenceType,
    estimated_duration: Option<u32>,
    is_recurring: bool,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskTemplateData {
    /// Persisted identifier.
    pub id: TaskTemplateId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: String,
    /// Persisted recurrence classification.
    pub recurrence_type: RecurrenceType,
    /// Persisted estimate in minutes.
    pub estimated_duration: Option<u32>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial replacement of template fields. Absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTemplateUpdate {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement recurrence classification.
    pub recurrence_type: Option<RecurrenceType>,
    /// Replacement estimate in minutes.
    pub estimated_duration: Option<u32>,
}

impl TaskTemplate {
    /// Creates a template.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTemplateName`] when the name is blank
    /// and [`TaskDomainError::TemplateNameTooLong`] past 100 characters.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        recurrence_type: RecurrenceType,
        estimated_duration: Option<u32>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskTemplateId::new(),
            name: template_name(name.into())?,
            description: description.into().trim().to_owned(),
            recurrence_type,
            estimated_duration,
            is_recurring: recurrence_type.is_recurring(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a template from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskTemplateData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            recurrence_type: data.recurrence_type,
            estimated_duration: data.estimated_duration,
            is_recurring: data.recurrence_type.is_recurring(),
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> TaskTemplateId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the recurrence classification.
    #[must_use]
    pub const fn recurrence_type(&self) -> RecurrenceType {
        self.recurrence_type
    }

    /// Returns `true` when the recurrence is anything but `none`.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.is_recurring
    }

    /// Returns the estimate in minutes, if known.
    #[must_use]
    pub const fn estimated_duration(&self) -> Option<u32> {
        self.estimated_duration
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTemplateName`] or
    /// [`TaskDomainError::TemplateNameTooLong`] when the replacement name is
    /// invalid. The template is left unchanged.
    pub fn apply(
        &mut self,
        update: TaskTemplateUpdate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let TaskTemplateUpdate {
            name,
            description,
            recurrence_type,
            estimated_duration,
        } = update;
        if let Some(replacement) = name {
            self.name = template_name(replacement)?;
        }
        if let Some(replacement) = description {
            self.description = replacement.trim().to_owned();
        }
        if let Some(replacement) = recurrence_type {
            self.recurrence_type = replacement;
            self.is_recurring = replacement.is_recurring();
        }
        if let Some(replacement) = estimated_duration {
            self.estimated_duration = Some(replacement);
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}

const NAME_MAX: usize = 100;

fn template_name(value: String) -> Result<String, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTemplateName);
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(TaskDomainError::TemplateNameTooLong { max: NAME_MAX });
    }
    Ok(trimmed.to_owned())
}
