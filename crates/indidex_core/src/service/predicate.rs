//! Keyword filters for the find command.
//!
//! A person matches when any keyword matches any of:
//! - a whole word of the name, ignoring case;
//! - the full phone number;
//! - the email, when the keyword contains `@`: `local@` compares the local
//!   part, `@domain.tld` compares the domain, anything else the full address.

use crate::model::person::Person;
use crate::store::view::Predicate;
use std::rc::Rc;

fn name_matches(person: &Person, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    person
        .name
        .split_whitespace()
        .any(|word| word.to_lowercase() == keyword)
}

fn phone_matches(person: &Person, keyword: &str) -> bool {
    person.phone == keyword
}

fn email_matches(person: &Person, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    let Some(at) = keyword.find('@') else {
        return false;
    };
    let email = person.email.to_lowercase();
    let (local, domain) = email.split_once('@').unwrap_or((email.as_str(), ""));

    if let Some(keyword_local) = keyword.strip_suffix('@') {
        return local == keyword_local;
    }
    if at == 0 && keyword[1..].contains('.') {
        return domain == &keyword[1..];
    }
    email == keyword
}

/// Returns whether `person` matches any of `keywords`.
pub fn matches_any_keyword(person: &Person, keywords: &[String]) -> bool {
    keywords.iter().map(|keyword| keyword.trim()).any(|keyword| {
        !keyword.is_empty()
            && (name_matches(person, keyword)
                || phone_matches(person, keyword)
                || email_matches(person, keyword))
    })
}

/// Builds a shareable view predicate from keywords.
pub fn keywords_predicate(keywords: Vec<String>) -> Predicate<Person> {
    Rc::new(move |person: &Person| matches_any_keyword(person, &keywords))
}

#[cfg(test)]
mod tests {
    use super::matches_any_keyword;
    use crate::model::person::Person;
    use crate::model::priority::Priority;

    fn alice() -> Person {
        Person::new(
            "Alice Pauline",
            "94351253",
            "alice@example.com",
            "123, Jurong West Ave 6",
            Priority::Low,
        )
    }

    fn keywords(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn name_keywords_match_whole_words_ignoring_case() {
        assert!(matches_any_keyword(&alice(), &keywords(&["pauline"])));
        assert!(matches_any_keyword(&alice(), &keywords(&["Bob", "ALICE"])));
        assert!(!matches_any_keyword(&alice(), &keywords(&["Ali"])));
    }

    #[test]
    fn phone_keyword_needs_full_number() {
        assert!(matches_any_keyword(&alice(), &keywords(&["94351253"])));
        assert!(!matches_any_keyword(&alice(), &keywords(&["9435"])));
    }

    #[test]
    fn email_keyword_patterns() {
        assert!(matches_any_keyword(&alice(), &keywords(&["Alice@"])));
        assert!(matches_any_keyword(&alice(), &keywords(&["@example.com"])));
        assert!(matches_any_keyword(&alice(), &keywords(&["alice@example.com"])));
        assert!(!matches_any_keyword(&alice(), &keywords(&["@example"])));
        assert!(!matches_any_keyword(&alice(), &keywords(&["bob@"])));
    }

    #[test]
    fn blank_keywords_match_nothing() {
        assert!(!matches_any_keyword(&alice(), &keywords(&["  "])));
        assert!(!matches_any_keyword(&alice(), &[]));
    }
}
