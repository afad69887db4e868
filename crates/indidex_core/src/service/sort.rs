//! Person ordering for the sort command.
//!
//! # Invariants
//! - Text fields compare case-insensitively.
//! - Direction reverses the primary key only; the name tie-break always
//!   runs ascending, so equal primary keys keep a stable, repeatable order.

use crate::model::person::Person;
use crate::model::priority::PriorityOrder;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Attribute a person list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Email,
    Phone,
    Address,
    Priority,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Priority => "priority",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "address" => Ok(Self::Address),
            "priority" => Ok(Self::Priority),
            other => Err(format!(
                "unsupported sort field `{other}`; expected name|email|phone|address|priority"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

fn compare_ignore_case(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

/// Builds the comparator used by the sort command.
pub fn person_comparator(
    field: SortField,
    direction: SortDirection,
    priority_order: PriorityOrder,
) -> impl Fn(&Person, &Person) -> Ordering {
    move |left, right| {
        let primary = match field {
            SortField::Name => compare_ignore_case(&left.name, &right.name),
            SortField::Email => compare_ignore_case(&left.email, &right.email),
            SortField::Phone => compare_ignore_case(&left.phone, &right.phone),
            SortField::Address => compare_ignore_case(&left.address, &right.address),
            SortField::Priority => left
                .priority
                .rank(priority_order)
                .cmp(&right.priority.rank(priority_order)),
        };
        let primary = match direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary
            .then_with(|| compare_ignore_case(&left.name, &right.name))
            .then_with(|| left.name.cmp(&right.name))
    }
}

#[cfg(test)]
mod tests {
    use super::{person_comparator, SortDirection, SortField};
    use crate::model::person::Person;
    use crate::model::priority::{Priority, PriorityOrder};

    fn person(name: &str, email: &str, priority: Priority) -> Person {
        Person::new(name, "91234567", email, "Blk 1", priority)
    }

    fn sorted_names(
        mut persons: Vec<Person>,
        field: SortField,
        direction: SortDirection,
        order: PriorityOrder,
    ) -> Vec<String> {
        persons.sort_by(person_comparator(field, direction, order));
        persons.into_iter().map(|person| person.name).collect()
    }

    #[test]
    fn name_sort_ignores_case() {
        let persons = vec![
            person("bob", "b@x.com", Priority::Low),
            person("Alice", "a@x.com", Priority::Low),
            person("carol", "c@x.com", Priority::Low),
        ];
        assert_eq!(
            sorted_names(
                persons,
                SortField::Name,
                SortDirection::Ascending,
                PriorityOrder::LowFirst
            ),
            vec!["Alice", "bob", "carol"]
        );
    }

    #[test]
    fn descending_keeps_ascending_name_tie_break() {
        let persons = vec![
            person("Dan", "d@x.com", Priority::High),
            person("Cat", "c@x.com", Priority::Low),
            person("Ann", "a@x.com", Priority::High),
        ];
        assert_eq!(
            sorted_names(
                persons.clone(),
                SortField::Priority,
                SortDirection::Descending,
                PriorityOrder::LowFirst
            ),
            vec!["Ann", "Dan", "Cat"]
        );
        assert_eq!(
            sorted_names(
                persons,
                SortField::Priority,
                SortDirection::Ascending,
                PriorityOrder::HighFirst
            ),
            vec!["Ann", "Dan", "Cat"]
        );
    }

    #[test]
    fn parses_field_names() {
        assert_eq!(" Email ".parse::<SortField>().unwrap(), SortField::Email);
        assert!("age".parse::<SortField>().is_err());
    }
}
