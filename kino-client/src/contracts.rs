//! Wire shapes of the remote API.
//!
//! Every payload is deserialized into a DTO first and only then validated
//! into model types. Anything that fails either step surfaces as
//! [`KinoError::RemoteUnavailable`]; a half-valid catalog is never handed
//! to the query engine.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use kino_core::{KinoError, Result};
use kino_model::url::Url;
use kino_model::{
    ContentType, MediaId, MediaItem, MediaTitle, SubscriptionPlan,
    SubscriptionStatus,
};
use serde::{Deserialize, Serialize};

/// One catalog, favorites or history entry as sent by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemDto {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(alias = "type")]
    pub content_type: String,
    /// RFC 3339 timestamp
    #[serde(alias = "uploadedAt")]
    pub added_at: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<u16>,
}

impl MediaItemDto {
    pub fn validate(self) -> Result<MediaItem> {
        let id = MediaId::new(self.id).map_err(malformed)?;
        let title = MediaTitle::new(self.title).map_err(|e| {
            KinoError::remote(format!("malformed media `{id}`: {e}"))
        })?;
        let thumbnail = Url::parse(&self.thumbnail).map_err(|e| {
            KinoError::remote(format!(
                "malformed thumbnail for `{id}`: {e}"
            ))
        })?;
        let content_type =
            self.content_type.parse::<ContentType>().map_err(|e| {
                KinoError::remote(format!("malformed media `{id}`: {e}"))
            })?;
        let added_at = parse_timestamp(&self.added_at).ok_or_else(|| {
            KinoError::remote(format!(
                "malformed timestamp `{}` for `{id}`",
                self.added_at
            ))
        })?;

        let genres = self
            .genres
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        let mut item =
            MediaItem::new(id, title, thumbnail, content_type, added_at)
                .with_genres(genres);
        if let Some(description) =
            self.description.filter(|d| !d.trim().is_empty())
        {
            item = item.with_description(description);
        }
        if let Some(year) = self.release_year {
            item = item.with_release_year(year);
        }
        Ok(item)
    }
}

impl From<&MediaItem> for MediaItemDto {
    fn from(item: &MediaItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.to_string(),
            thumbnail: item.thumbnail.to_string(),
            genres: item.genres.clone(),
            content_type: item.content_type.api_name().to_string(),
            added_at: item.added_at.to_rfc3339(),
            description: item.description.clone(),
            release_year: item.release_year,
        }
    }
}

/// Validate a list payload. Fails on the first malformed entry or on a
/// duplicate id.
pub fn validate_items(dtos: Vec<MediaItemDto>) -> Result<Vec<MediaItem>> {
    let mut seen = HashSet::with_capacity(dtos.len());
    let mut items = Vec::with_capacity(dtos.len());
    for dto in dtos {
        let item = dto.validate()?;
        if !seen.insert(item.id.clone()) {
            return Err(KinoError::remote(format!(
                "duplicate media id `{}` in payload",
                item.id
            )));
        }
        items.push(item);
    }
    Ok(items)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    pub plan_id: String,
    pub name: String,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub renews_at: Option<DateTime<Utc>>,
}

impl SubscriptionDto {
    pub fn validate(self) -> Result<SubscriptionPlan> {
        if self.plan_id.trim().is_empty() {
            return Err(KinoError::remote("subscription without a plan id"));
        }
        Ok(SubscriptionPlan {
            plan_id: self.plan_id,
            name: self.name,
            status: self.status,
            renews_at: self.renews_at,
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn malformed(e: impl std::fmt::Display) -> KinoError {
    KinoError::remote(format!("malformed media: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dto(value: serde_json::Value) -> MediaItemDto {
        serde_json::from_value(value).unwrap()
    }

    fn valid() -> serde_json::Value {
        json!({
            "id": "m-1",
            "title": "Heat",
            "thumbnail": "https://cdn.example.com/heat.jpg",
            "genres": ["Crime", " ", "Drama "],
            "contentType": "movie",
            "addedAt": "2024-05-01T12:00:00+02:00"
        })
    }

    #[test]
    fn valid_payload_becomes_media_item() {
        let item = dto(valid()).validate().unwrap();
        assert_eq!(item.id.as_str(), "m-1");
        assert_eq!(item.content_type, ContentType::Movie);
        assert_eq!(item.genres, vec!["Crime", "Drama"]);
        assert_eq!(item.added_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert_eq!(item.description, None);
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let item = dto(json!({
            "id": "s-1",
            "title": "Dark",
            "thumbnail": "https://cdn.example.com/dark.jpg",
            "type": "series",
            "uploadedAt": "2024-05-01T00:00:00Z",
            "releaseYear": 2017
        }))
        .validate()
        .unwrap();
        assert_eq!(item.content_type, ContentType::Series);
        assert_eq!(item.release_year, Some(2017));
        assert!(item.genres.is_empty());
    }

    #[test]
    fn malformed_fields_are_remote_errors() {
        let cases = [
            ("title", json!("   ")),
            ("id", json!("")),
            ("thumbnail", json!("not a url")),
            ("contentType", json!("podcast")),
            ("addedAt", json!("yesterday")),
        ];
        for (field, value) in cases {
            let mut payload = valid();
            payload[field] = value;
            let err = dto(payload).validate().unwrap_err();
            assert!(
                matches!(err, KinoError::RemoteUnavailable(_)),
                "{field}: {err:?}"
            );
        }
    }

    #[test]
    fn duplicate_ids_reject_the_payload() {
        let err =
            validate_items(vec![dto(valid()), dto(valid())]).unwrap_err();
        assert!(matches!(err, KinoError::RemoteUnavailable(_)));
    }

    #[test]
    fn dto_conversion_preserves_fields() {
        let item = dto(valid()).validate().unwrap();
        let back = MediaItemDto::from(&item).validate().unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn subscription_requires_plan_id() {
        let plan: SubscriptionDto = serde_json::from_value(json!({
            "planId": "",
            "name": "Basic",
            "status": "active"
        }))
        .unwrap();
        assert!(plan.validate().is_err());
    }
}
