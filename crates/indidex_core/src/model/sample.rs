//! Seed data for first launch and smoke checks.

use crate::model::person::{Person, Socials};
use crate::model::priority::Priority;
use crate::model::project::{MembershipError, Project};
use chrono::{Days, NaiveDate};

fn social(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Returns the default sample persons, in display order.
pub fn sample_persons() -> Vec<Person> {
    vec![
        Person::new(
            "Alex Yeoh",
            "87438807",
            "alexyeoh@example.com",
            "Blk 30 Geylang Street 29, #06-40",
            Priority::Low,
        )
        .with_socials(Socials::new(
            social("alexyeoh#1234"),
            social("linkedin.com/in/alexyeoh"),
            social("@alex_yo"),
            social("youtube.com/@alexyeohchannel"),
        ))
        .with_tags(["friends"]),
        Person::new(
            "Bernice Yu",
            "99272758",
            "berniceyu@example.com",
            "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
            Priority::Low,
        )
        .with_socials(Socials::new(
            social("bernice#5678"),
            social("linkedin.com/in/berniceyu"),
            social("@berniceyu"),
            None,
        ))
        .with_tags(["colleagues", "friends"]),
        Person::new(
            "Charlotte Oliveiro",
            "93210283",
            "charlotte@example.com",
            "Blk 11 Ang Mo Kio Street 74, #11-04",
            Priority::Medium,
        )
        .with_socials(Socials::new(
            None,
            social("linkedin.com/in/charlotteoliveiro"),
            social("@charlotteo"),
            social("youtube.com/@charlotteoliveirochannel"),
        ))
        .with_tags(["neighbours"]),
        Person::new(
            "David Li",
            "91031282",
            "lidavid@example.com",
            "Blk 436 Serangoon Gardens Street 26, #16-43",
            Priority::High,
        )
        .with_socials(Socials::new(
            social("david#1121"),
            social("linkedin.com/in/davidli"),
            None,
            social("youtube.com/@davidlichannel"),
        ))
        .with_tags(["family"]),
        Person::new(
            "Irfan Ibrahim",
            "92492021",
            "irfan@example.com",
            "Blk 47 Tampines Street 20, #17-35",
            Priority::Low,
        )
        .with_socials(Socials::new(
            social("irfan#3141"),
            None,
            social("@irfanibrahim"),
            social("youtube.com/@irfanibrahimchannel"),
        ))
        .with_tags(["classmates"]),
        Person::new(
            "Roy Balakrishnan",
            "92624417",
            "royb@example.com",
            "Blk 45 Aljunied Street 85, #11-31",
            Priority::Medium,
        )
        .with_socials(Socials::new(
            None,
            None,
            social("@roybala"),
            social("youtube.com/@roybalakrishnanchannel"),
        ))
        .with_tags(["colleagues"]),
    ]
}

/// Returns the sample project, due `days_ahead` days after `today`.
///
/// Members reference the first two sample persons.
pub fn sample_project(today: NaiveDate, days_ahead: u32) -> Result<Project, MembershipError> {
    let deadline = today
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .unwrap_or(NaiveDate::MAX);
    Project::new(
        "Orientation Camp",
        Priority::High,
        deadline,
        ["Alex Yeoh", "Bernice Yu"],
    )
}
