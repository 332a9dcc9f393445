use crate::{MediaTitle, ViewerId};

/// Body of the add/remove favorite calls.
///
/// Favorites are keyed by title on the remote side, not by media id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FavoriteRequest {
    pub viewer_id: ViewerId,
    pub title: MediaTitle,
}

impl FavoriteRequest {
    pub fn new(viewer_id: ViewerId, title: MediaTitle) -> Self {
        Self { viewer_id, title }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let request = FavoriteRequest::new(
            ViewerId::new("viewer-7").unwrap(),
            MediaTitle::new("Heat").unwrap(),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "viewerId": "viewer-7", "title": "Heat" })
        );
    }
}
