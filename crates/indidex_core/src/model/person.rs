//! Person domain model.
//!
//! # Responsibility
//! - Define the contact record tracked by the store.
//! - Provide whole-object replacement helpers; persons are never edited in place.
//!
//! # Invariants
//! - `name` is the identity key and is never blank.
//! - Social handles are either absent or non-empty.
//! - Tags are unique; iteration order is lexical for stable display.

use crate::model::identity::{EntityKind, Identified};
use crate::model::priority::Priority;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Optional social handles attached to a person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Socials {
    pub discord: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
}

impl Socials {
    /// Builds socials, treating blank handles as absent.
    pub fn new(
        discord: Option<String>,
        linkedin: Option<String>,
        instagram: Option<String>,
        youtube: Option<String>,
    ) -> Self {
        Self {
            discord: non_blank(discord),
            linkedin: non_blank(linkedin),
            instagram: non_blank(instagram),
            youtube: non_blank(youtube),
        }
    }

    /// Returns whether no handle is set.
    pub fn is_empty(&self) -> bool {
        self.display_entries().is_empty()
    }

    /// Labelled handles in display order: Discord, LinkedIn, Instagram, YouTube.
    pub fn display_entries(&self) -> Vec<String> {
        [
            ("Discord", &self.discord),
            ("LinkedIn", &self.linkedin),
            ("Instagram", &self.instagram),
            ("YouTube", &self.youtube),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|value| format!("{label}: {value}")))
        .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Validation errors for person construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    BlankName,
    BlankField(&'static str),
    BlankTag,
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "person name must not be blank"),
            Self::BlankField(field) => write!(f, "person {field} must not be blank"),
            Self::BlankTag => write!(f, "tag names must not be blank"),
        }
    }
}

impl Error for PersonValidationError {}

/// Immutable contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub priority: Priority,
    pub socials: Socials,
    pub tags: BTreeSet<String>,
}

impl Person {
    /// Creates a person without socials or tags.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            priority,
            socials: Socials::default(),
            tags: BTreeSet::new(),
        }
    }

    /// Returns a copy with the given socials.
    pub fn with_socials(mut self, socials: Socials) -> Self {
        self.socials = socials;
        self
    }

    /// Returns a copy whose tag set is exactly `tags`.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns a copy with `tags` merged into the existing tag set.
    pub fn with_tags_added<'a, I>(&self, tags: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut updated = self.clone();
        updated.tags.extend(tags.into_iter().cloned());
        updated
    }

    /// Checks the non-format constraints the model relies on.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.name.trim().is_empty() {
            return Err(PersonValidationError::BlankName);
        }
        for (field, value) in [
            ("phone", &self.phone),
            ("email", &self.email),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(PersonValidationError::BlankField(field));
            }
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(PersonValidationError::BlankTag);
        }
        Ok(())
    }
}

impl Identified for Person {
    const KIND: EntityKind = EntityKind::Person;

    fn identity_key(&self) -> &str {
        &self.name
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}; Phone: {}; Email: {}", self.name, self.phone, self.email)?;
        for entry in self.socials.display_entries() {
            write!(f, "; {entry}")?;
        }
        write!(
            f,
            "; Address: {}; Priority: {}; Tags: ",
            self.address, self.priority
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Person, PersonValidationError, Socials};
    use crate::model::identity::Identified;
    use crate::model::priority::Priority;

    fn alice() -> Person {
        Person::new("Alice", "91234567", "alice@example.com", "Blk 1", Priority::Low)
    }

    #[test]
    fn socials_drop_blank_handles() {
        let socials = Socials::new(
            Some("  ".into()),
            Some("linkedin.com/in/a".into()),
            None,
            Some(String::new()),
        );
        assert_eq!(socials.discord, None);
        assert_eq!(socials.youtube, None);
        assert_eq!(socials.display_entries(), vec!["LinkedIn: linkedin.com/in/a".to_string()]);
        assert!(Socials::default().is_empty());
    }

    #[test]
    fn identity_ignores_non_key_fields() {
        let mut other = alice();
        other.phone = "80000000".into();
        assert!(alice().is_same(&other));
        assert_ne!(alice(), other);
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut person = alice();
        person.name = "  ".into();
        assert_eq!(person.validate(), Err(PersonValidationError::BlankName));

        let mut person = alice();
        person.email = String::new();
        assert_eq!(person.validate(), Err(PersonValidationError::BlankField("email")));

        assert_eq!(alice().with_tags([" "]).validate(), Err(PersonValidationError::BlankTag));
    }

    #[test]
    fn tags_added_merge_without_duplicates() {
        let person = alice().with_tags(["friends"]);
        let extra = vec!["friends".to_string(), "work".to_string()];
        let tagged = person.with_tags_added(&extra);
        assert_eq!(tagged.tags.len(), 2);
        assert_eq!(person.tags.len(), 1);
    }

    #[test]
    fn display_lists_fields_and_tags() {
        let rendered = alice().with_tags(["b", "a"]).to_string();
        assert_eq!(
            rendered,
            "Alice; Phone: 91234567; Email: alice@example.com; Address: Blk 1; Priority: LOW; Tags: [a][b]"
        );
    }
}
