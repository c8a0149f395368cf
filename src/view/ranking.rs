use chrono::FixedOffset;
use maud::{Markup, html};

use crate::controller::ranking::RankingModel;
use crate::model::{CaddieTable, RankingEntry};
use crate::view::format::{
    format_number, format_play_time, medal_glyph, rank_class, text_or_placeholder,
};

pub const TABLE_ID: &str = "ranking-table";

#[must_use]
pub fn render_rankings_page(model: &RankingModel, offset: &FixedOffset) -> Markup {
    html! {
        p class="subtitle" { "Rankings per course." }
        (render_course_selector(model))
        div id=(TABLE_ID) {
            (render_ranking_table(model, offset))
        }
    }
}

#[must_use]
pub fn render_course_selector(model: &RankingModel) -> Markup {
    let selected_id = model.selected.as_ref().map(ToString::to_string).unwrap_or_default();
    html! {
        div class="course-select" {
            label for="course-select" { "Course" }
            @if model.loading_courses {
                div class="muted" { "Loading courses..." }
            } @else {
                select id="course-select" name="course"
                    hx-get="rankings/table" hx-trigger="change" hx-sync="this:replace"
                    hx-target=(format!("#{TABLE_ID}")) {
                    option value="" selected[selected_id.is_empty()] { "---" }
                    @if model.courses.is_empty() {
                        option value="" disabled { "No courses" }
                    } @else {
                        @for course in model.selectable_courses() {
                            option value=(course.id.as_str()) selected[course.id.as_str() == selected_id] {
                                (course.display_label())
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Table fragment swapped in whenever the selected course changes.
#[must_use]
pub fn render_ranking_table(model: &RankingModel, offset: &FixedOffset) -> Markup {
    html! {
        @if model.loading {
            div class="empty" { "Loading..." }
        } @else if model.rankings.is_empty() {
            div class="empty" {
                @if model.selected.is_some() { "No ranking data" } @else { "Select a course" }
            }
        } @else {
            table class="styled-table" {
                thead {
                    tr {
                        th { "RANK" }
                        th { "NICKNAME" }
                        th { "WALLET" }
                        th { "SCORE" }
                        th { "STROKES" }
                        th { "CADDIE" }
                        th { "HOLE OUT" }
                    }
                }
                tbody {
                    @for entry in &model.rankings {
                        (render_ranking_row(entry, &model.caddies, offset))
                    }
                }
            }
        }
    }
}

fn render_ranking_row(entry: &RankingEntry, caddies: &CaddieTable, offset: &FixedOffset) -> Markup {
    html! {
        tr class=[(entry.rank <= 3).then_some("podium")] {
            td {
                @if let Some(medal) = medal_glyph(entry.rank) {
                    span class="medal" { (medal) }
                }
                span class=(rank_class(entry.rank)) { (entry.rank) }
            }
            td { (text_or_placeholder(entry.nickname.as_deref())) }
            td { (text_or_placeholder(entry.wallet_address.as_deref())) }
            td class="score" { (format_number(entry.score)) }
            td class="score" { (format_number(entry.stroke_count)) }
            td { (caddies.display_name(entry.caddie_id.as_ref())) }
            td { (format_play_time(entry.last_play_at.as_deref(), offset)) }
        }
    }
}
