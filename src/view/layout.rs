use maud::{DOCTYPE, Markup, html};

use crate::{HTMX_INTEGRITY, HTMX_PATH};

pub const APP_TITLE: &str = "Marty Admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Users,
    Rankings,
}

impl NavItem {
    const ALL: [NavItem; 3] = [NavItem::Dashboard, NavItem::Users, NavItem::Rankings];

    fn href(self) -> &'static str {
        match self {
            NavItem::Dashboard => "./",
            NavItem::Users => "users",
            NavItem::Rankings => "rankings",
        }
    }

    fn label(self) -> &'static str {
        match self {
            NavItem::Dashboard => "📊 Dashboard",
            NavItem::Users => "👥 Users",
            NavItem::Rankings => "🏆 Rankings",
        }
    }
}

/// Page shell: sidebar navigation plus the given main content.
#[must_use]
pub fn render_page(active: NavItem, heading: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (heading) " | " (APP_TITLE) }
                script src=(HTMX_PATH) defer integrity=(HTMX_INTEGRITY) crossorigin="anonymous" {}
            }
            body class="dark" {
                div class="layout" {
                    aside class="sidebar" {
                        div class="brand" { h1 { (APP_TITLE) } }
                        nav {
                            ul {
                                @for item in NavItem::ALL {
                                    li {
                                        a href=(item.href())
                                            class=(if item == active { "nav-link active" } else { "nav-link" })
                                            aria-current=[(item == active).then_some("page")] {
                                            (item.label())
                                        }
                                    }
                                }
                            }
                        }
                    }
                    main class="content" {
                        h2 { (heading) }
                        (content)
                    }
                }
            }
        }
    }
}
