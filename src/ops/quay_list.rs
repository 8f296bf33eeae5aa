//! Implementation of `quay list`.

use anyhow::Result;

use crate::core::status::{sort_items, ListItem};
use crate::core::workspace::Workspace;

/// List every package the project defines or references.
///
/// Items are ordered by status severity, then import path.
pub fn list_packages(ws: &mut Workspace) -> Result<Vec<ListItem>> {
    ws.load_packages(&[])?;

    let mut items: Vec<ListItem> = ws.packages().map(|p| p.list_item()).collect();
    sort_items(&mut items);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::{VendorManifest, VendorPackage};
    use crate::core::status::ListStatus;
    use crate::test_support::WorkspaceFixture;

    #[test]
    fn test_list_ordering() {
        let fx = WorkspaceFixture::new();
        fx.std_package("fmt");
        fx.std_package("os");
        fx.gopath_package("github.com/user/log", &[]);
        fx.gopath_package("github.com/user/gone", &[]);
        let project = fx.init_project("example.com/app");
        fx.write_go(
            &project,
            "main.go",
            "main",
            &["os", "fmt", "github.com/user/log", "nowhere.io/x", "example.com/app/util"],
        );
        fx.write_go(&project.join("util"), "util.go", "util", &["fmt"]);

        let mut manifest = VendorManifest::load(&project).unwrap();
        manifest.push(VendorPackage::new(
            "github.com/user/gone",
            "example.com/app/internal/github.com/user/gone",
        ));
        manifest.save(&project).unwrap();

        let mut ws = fx.workspace(&project);
        let items = list_packages(&mut ws).unwrap();

        assert_eq!(
            items,
            vec![
                ListItem::new(ListStatus::Unused, "github.com/user/gone"),
                ListItem::new(ListStatus::External, "github.com/user/log"),
                ListItem::new(ListStatus::Local, "example.com/app"),
                ListItem::new(ListStatus::Local, "example.com/app/util"),
                ListItem::new(ListStatus::Std, "fmt"),
                ListItem::new(ListStatus::Std, "os"),
                ListItem::new(ListStatus::Missing, "nowhere.io/x"),
            ]
        );
        assert_eq!(items[0].to_string(), "u github.com/user/gone");
    }

    #[test]
    fn test_list_empty_project() {
        let fx = WorkspaceFixture::new();
        let project = fx.init_project("example.com/app");

        let mut ws = fx.workspace(&project);
        assert!(list_packages(&mut ws).unwrap().is_empty());
    }

    #[test]
    fn test_list_is_repeatable() {
        let fx = WorkspaceFixture::new();
        fx.std_package("fmt");
        let project = fx.init_project("example.com/app");
        fx.write_go(&project, "main.go", "main", &["fmt"]);

        let mut ws = fx.workspace(&project);
        let first = list_packages(&mut ws).unwrap();
        let second = list_packages(&mut ws).unwrap();
        assert_eq!(first, second);
    }
}
