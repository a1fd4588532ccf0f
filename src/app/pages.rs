//! Static page shells. Placeholder copy until real inventory/POS logic exists.

use crate::app::navigation::{render_header, SITE_DESCRIPTION, SITE_TITLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Marketing,
    Dashboard,
    Inventory,
    Pos,
    Reports,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub description: &'static str,
    pub href: Option<&'static str>,
}

pub const HERO_BADGE: &str = "Multi-tenant café OS";

pub const HERO_CARDS: [Card; 3] = [
    Card {
        title: "Real-time Inventory",
        description: "Track stock, suppliers, and purchase orders with automated low-stock alerts.",
        href: Some("/inventory"),
    },
    Card {
        title: "Offline-first POS",
        description: "Capture dine-in and takeaway orders even without internet connectivity.",
        href: Some("/pos"),
    },
    Card {
        title: "Daily Insights",
        description: "Generate GST-ready bills, payment breakdowns, and end-of-day Z reports.",
        href: Some("/reports"),
    },
];

pub const DASHBOARD_HIGHLIGHTS: [Card; 3] = [
    Card {
        title: "Inventory Snapshot",
        description: "24 SKUs below threshold, 2 pending purchase orders",
        href: None,
    },
    Card {
        title: "Today's Revenue",
        description: "₹42,180 across UPI, cash, and cards",
        href: None,
    },
    Card {
        title: "Sync Status",
        description: "Last offline sync 12 minutes ago",
        href: None,
    },
];

/// Calls to action on the home page.
pub const HOME_LINKS: [Card; 2] = [
    Card {
        title: "Launch App",
        description: "",
        href: Some("/login"),
    },
    Card {
        title: "Deployment Guide",
        description: "",
        href: Some("/docs/setup"),
    },
];

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Marketing,
        Page::Dashboard,
        Page::Inventory,
        Page::Pos,
        Page::Reports,
        Page::Login,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Marketing => "/about",
            Page::Dashboard => "/dashboard",
            Page::Inventory => "/inventory",
            Page::Pos => "/pos",
            Page::Reports => "/reports",
            Page::Login => "/login",
        }
    }

    pub fn from_path(path: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    pub fn heading(self) -> &'static str {
        match self {
            Page::Home => "Stay on top of inventory and café operations wherever you are.",
            Page::Marketing => "Why cafés choose us",
            Page::Dashboard => "Outlet overview",
            Page::Inventory => "Inventory workspace",
            Page::Pos => "Point of Sale",
            Page::Reports => "Reports & Z summary",
            Page::Login => "Sign in to your café",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            Page::Home => {
                "A single workspace for owners, managers, and staff to collaborate on stock, menu, and orders. \
                 Works offline, prints thermal receipts, and syncs with Supabase in real time."
            }
            Page::Marketing => {
                "Built specifically for Indian cafés, the platform keeps GST-compliant billing, raw material costing, \
                 and team collaboration in sync. Deploy in minutes using Supabase and Vercel."
            }
            Page::Dashboard => {
                "This route will host authenticated tenant dashboards. Wire Supabase auth middleware to guard access \
                 and hydrate data with queries against the multi-tenant schema."
            }
            Page::Inventory => {
                "Manage products, suppliers, purchase orders, and stock audits. Connect this view to Supabase tables \
                 for multi-tenant queries."
            }
            Page::Pos => {
                "Configure menu layouts, manage open orders, and trigger kitchen order tickets. This placeholder \
                 illustrates where the offline-first POS surface will live."
            }
            Page::Reports => {
                "Build interactive charts, CSV exports, and daily GST-compliant summaries here. Hook into Supabase \
                 reporting views or cached aggregates to keep analytics fast."
            }
            Page::Login => "Use your email to receive a secure magic link.",
        }
    }

    pub fn cards(self) -> &'static [Card] {
        match self {
            Page::Home => &HERO_CARDS,
            _ => &[],
        }
    }

    pub fn render(self) -> String {
        let mut out = String::new();
        if self == Page::Home {
            out.push_str(&format!("[{}]\n", HERO_BADGE));
        }
        out.push_str(self.heading());
        out.push('\n');
        out.push_str(&"=".repeat(self.heading().chars().count()));
        out.push_str("\n\n");
        out.push_str(self.body());
        out.push('\n');

        if self == Page::Home {
            for link in HOME_LINKS {
                out.push_str(&format!("-> {} ({})\n", link.title, link.href.unwrap_or("")));
            }
            out.push('\n');
            for highlight in DASHBOARD_HIGHLIGHTS {
                out.push_str(&format!("{}: {}\n", highlight.title, highlight.description));
            }
        }

        for card in self.cards() {
            out.push_str(&format!("\n{}\n  {}\n", card.title, card.description));
            if let Some(href) = card.href {
                out.push_str(&format!("  Explore -> {}\n", href));
            }
        }
        out
    }
}

pub fn document_title(page: Page) -> String {
    match page {
        Page::Home => SITE_TITLE.to_string(),
        other => format!("{} | {}", other.heading(), SITE_TITLE),
    }
}

/// Full page: title and description metadata, site header, then the page itself.
pub fn render_document(page: Page) -> String {
    format!(
        "{}\n{}\n\n{}\n\n{}",
        document_title(page),
        SITE_DESCRIPTION,
        render_header(page.path()),
        page.render()
    )
}
