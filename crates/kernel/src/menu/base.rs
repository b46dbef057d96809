//! Host-owned starting trees for each named menu.

use atrium_sdk::menu::MenuNode;

/// Administrative menu.
pub const ADMIN_MENU: &str = "admin";

/// Public site menu.
pub const MAIN_MENU: &str = "main";

/// The tree the host starts from before plugins contribute.
///
/// Unknown menu names start from an empty root.
pub fn base_menu(menu_name: &str) -> MenuNode {
    let root = MenuNode::new("root", menu_name);
    match menu_name {
        ADMIN_MENU => root
            .child(
                MenuNode::new("dashboard", "Dashboard")
                    .path("/admin")
                    .icon("layout-dashboard")
                    .order(10),
            )
            .child(
                MenuNode::new("settings", "Settings")
                    .path("/admin/settings")
                    .icon("settings")
                    .order(100),
            ),
        MAIN_MENU => root.child(MenuNode::new("home", "Home").path("/").order(0)),
        _ => root,
    }
}
