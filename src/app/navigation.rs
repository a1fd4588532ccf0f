//! Site header: brand, primary routes, and the Z report shortcut.

pub const BRAND: &str = "Inventory Café";
pub const SITE_TITLE: &str = "Inventory & Café Manager";
pub const SITE_DESCRIPTION: &str =
    "Multi-tenant inventory and POS platform for cafés with offline-ready PWA experience.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub href: &'static str,
    pub label: &'static str,
}

pub const ROUTES: [Route; 4] = [
    Route {
        href: "/",
        label: "Dashboard",
    },
    Route {
        href: "/inventory",
        label: "Inventory",
    },
    Route {
        href: "/pos",
        label: "POS",
    },
    Route {
        href: "/reports",
        label: "Reports",
    },
];

pub const Z_REPORT_SHORTCUT: Route = Route {
    href: "/reports",
    label: "Daily Z Report",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub route: Route,
    pub active: bool,
}

impl Route {
    /// Exact string match; `/inventory/items` does not activate `/inventory`.
    pub fn is_active(&self, current_path: &str) -> bool {
        self.href == current_path
    }
}

pub fn nav_items(current_path: &str) -> Vec<NavItem> {
    ROUTES
        .iter()
        .map(|route| NavItem {
            route: *route,
            active: route.is_active(current_path),
        })
        .collect()
}

/// Plain-text header, one route per line, active route marked with `*`.
pub fn render_header(current_path: &str) -> String {
    let mut lines = vec![BRAND.to_string()];
    for item in nav_items(current_path) {
        let marker = if item.active { '*' } else { ' ' };
        lines.push(format!(
            "{} {:<10} {}",
            marker, item.route.label, item.route.href
        ));
    }
    lines.push(format!(
        "  {:<10} {}",
        Z_REPORT_SHORTCUT.label, Z_REPORT_SHORTCUT.href
    ));
    lines.join("\n")
}
