use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub handicap: u32,
    pub total_rounds: u32,
    pub best_score: u32,
    pub average_score: u32,
    pub join_date: NaiveDate,
    pub status: UserStatus,
}

/// Static roster shown on the users page until a member endpoint exists.
#[must_use]
pub fn mock_users() -> Vec<User> {
    let rows: [(u32, &str, &str, u32, u32, u32, u32, (i32, u32, u32), UserStatus); 5] = [
        (1, "Taro Tanaka", "tanaka@example.com", 18, 45, 82, 92, (2023, 1, 15), UserStatus::Active),
        (2, "Hanako Sato", "sato@example.com", 12, 78, 76, 85, (2022, 8, 20), UserStatus::Active),
        (3, "Ichiro Suzuki", "suzuki@example.com", 24, 23, 95, 105, (2024, 3, 10), UserStatus::Active),
        (4, "Jiro Yamada", "yamada@example.com", 8, 156, 70, 78, (2021, 5, 5), UserStatus::Active),
        (5, "Saburo Takahashi", "takahashi@example.com", 15, 67, 80, 88, (2023, 6, 12), UserStatus::Inactive),
    ];

    rows.into_iter()
        .filter_map(|(id, name, email, handicap, total_rounds, best_score, average_score, (y, m, d), status)| {
            Some(User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                handicap,
                total_rounds,
                best_score,
                average_score,
                join_date: NaiveDate::from_ymd_opt(y, m, d)?,
                status,
            })
        })
        .collect()
}
