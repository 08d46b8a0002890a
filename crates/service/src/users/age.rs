use chrono::{Datelike, NaiveDate};

use super::domain::User;

/// Whole calendar years elapsed from `birthday` to `today`.
/// Negative when `birthday` lies in the future.
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birthday.year();
    if (today.month(), today.day()) < (birthday.month(), birthday.day()) {
        years -= 1;
    }
    years
}

/// Keep users aged within `from..=to` on `today`, ordered by birthday
/// ascending. Users sharing a birthday keep their input order.
pub fn select_by_age(users: Vec<User>, from: i32, to: i32, today: NaiveDate) -> Vec<User> {
    let mut selected: Vec<User> = users
        .into_iter()
        .filter(|u| (from..=to).contains(&age_on(u.birthday, today)))
        .collect();
    selected.sort_by_key(|u| u.birthday);
    selected
}
