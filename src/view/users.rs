use maud::{Markup, html};

use crate::model::{User, UserStatus};

#[must_use]
pub fn render_users(users: &[User]) -> Markup {
    html! {
        p class="subtitle" { "Registered members." }
        @if users.is_empty() {
            div class="empty" { "No users" }
        } @else {
            table class="styled-table" {
                thead {
                    tr {
                        th { "ID" }
                        th { "NAME" }
                        th { "EMAIL" }
                        th { "HANDICAP" }
                        th { "ROUNDS" }
                        th { "BEST" }
                        th { "AVERAGE" }
                        th { "JOINED" }
                        th { "STATUS" }
                    }
                }
                tbody {
                    @for user in users {
                        tr {
                            td { (user.id) }
                            td { (user.name) }
                            td { (user.email) }
                            td { (user.handicap) }
                            td { (user.total_rounds) }
                            td { (user.best_score) }
                            td { (user.average_score) }
                            td { (user.join_date.format("%Y/%m/%d").to_string()) }
                            td {
                                span class=(match user.status {
                                    UserStatus::Active => "badge active",
                                    UserStatus::Inactive => "badge inactive",
                                }) { (user.status.to_string()) }
                            }
                        }
                    }
                }
            }
        }
    }
}
