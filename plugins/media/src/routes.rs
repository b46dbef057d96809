//! Routes the media plugin exposes to the host router.

use atrium_sdk::types::RouteDefinition;

/// File browser and folder browser, both behind an authenticated session.
pub fn routes() -> Vec<RouteDefinition> {
    vec![
        RouteDefinition::new("/media", "media")
            .view("MediaFileList")
            .title("Media Files")
            .requires_auth(),
        RouteDefinition::new("/media/folders", "media-folders")
            .view("MediaFolderList")
            .title("Media Folders")
            .requires_auth(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_returns_two_authenticated_routes() {
        let routes = routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].path, "/media");
        assert_eq!(routes[1].path, "/media/folders");
        assert!(routes.iter().all(|r| r.requires_auth));
    }
}
