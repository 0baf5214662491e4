use super::types::Links;

const WFAPI_MARKER: &str = "/wfapi/";

/// Derives the resource root of an entity from its `self` hyperlink.
///
/// Every `wfapi` resource lives at `<root>/wfapi/<resource>`, so the root is whatever
/// precedes the last `/wfapi/` marker of `_links.self.href`. Sub-resources are then
/// addressed by appending a fixed suffix to it (`/wfapi/log`, `/wfapi/artifacts`, ...).
///
/// # Returns
///
/// The root URL (e.g. <https://ci/job/app/7> for <https://ci/job/app/7/wfapi/describe>),
/// or an empty string when the link is absent or not shaped like a `wfapi` URL.
pub fn extract_base_url(links: &Links) -> String {
    links
        .get("self")
        .and_then(|link| link.get("href"))
        .and_then(|href| strip_wfapi_suffix(href))
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn strip_wfapi_suffix(href: &str) -> Option<&str> {
    let marker = href.rfind(WFAPI_MARKER)?;
    let (root, rest) = (&href[..marker], &href[marker + WFAPI_MARKER.len()..]);
    (!root.is_empty() && !rest.is_empty()).then_some(root)
}
