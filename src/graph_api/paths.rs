//! Graph resource paths, relative to `{graph_base_url}/{api_version}`.
//!
//! Drive-relative paths are trimmed of surrounding slashes and
//! percent-encoded with `/` left intact, so `Shared Documents/Q1 report.xlsx`
//! addresses `root:/Shared%20Documents/Q1%20report.xlsx`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped in drive paths: alphanumerics, `_.-~` and `/`
const DRIVE_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode a drive-relative path, keeping `/` separators
pub fn quote_path(path: &str) -> String {
    utf8_percent_encode(path.trim_matches('/'), DRIVE_PATH).to_string()
}

/// Join a folder path and an item name with a single `/`
pub fn join_remote(folder: &str, name: &str) -> String {
    let folder = folder.trim_matches('/');
    let name = name.trim_matches('/');
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

fn normalized(path: Option<&str>) -> Option<&str> {
    path.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty())
}

pub fn site_by_name(sp_domain: &str, name: &str) -> String {
    format!("/sites/{}:/sites/{}", sp_domain, quote_path(name))
}

pub fn site(site_id: &str) -> String {
    format!("/sites/{}", site_id)
}

pub fn site_drives(site_id: &str) -> String {
    format!("/sites/{}/drives", site_id)
}

/// Folder or file addressed by path; `None` or `/` means the drive root
pub fn drive_item(drive_id: &str, path: Option<&str>) -> String {
    match normalized(path) {
        Some(p) => format!("/drives/{}/root:/{}", drive_id, quote_path(p)),
        None => format!("/drives/{}/root", drive_id),
    }
}

pub fn drive_children(drive_id: &str, path: Option<&str>) -> String {
    match normalized(path) {
        Some(p) => format!("/drives/{}/root:/{}:/children", drive_id, quote_path(p)),
        None => format!("/drives/{}/root/children", drive_id),
    }
}

pub fn drive_item_content(drive_id: &str, path: &str) -> String {
    format!("/drives/{}/root:/{}:/content", drive_id, quote_path(path))
}

pub fn drive_item_copy(drive_id: &str, path: &str) -> String {
    format!("/drives/{}/root:/{}:/copy", drive_id, quote_path(path))
}

pub fn drive_item_by_id(drive_id: &str, item_id: &str) -> String {
    format!("/drives/{}/items/{}", drive_id, item_id)
}

/// `parentReference.path` value for copy targets; not URL-encoded
pub fn copy_parent_path(drive_id: &str, target_path: &str) -> String {
    format!("/drives/{}/root:/{}", drive_id, target_path.trim_matches('/'))
}

pub fn site_lists(site_id: &str) -> String {
    format!("/sites/{}/lists", site_id)
}

pub fn list_columns(site_id: &str, list_id: &str) -> String {
    format!("/sites/{}/lists/{}/columns", site_id, list_id)
}

pub fn list_items(site_id: &str, list_id: &str) -> String {
    format!("/sites/{}/lists/{}/items", site_id, list_id)
}

pub fn list_item(site_id: &str, list_id: &str, item_id: &str) -> String {
    format!("/sites/{}/lists/{}/items/{}", site_id, list_id, item_id)
}
