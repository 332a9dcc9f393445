#![allow(dead_code)]

use kino_model::chrono::{DateTime, Duration, TimeZone, Utc};
use kino_model::url::Url;
use kino_model::{ContentType, MediaId, MediaItem, MediaTitle};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

pub fn item(
    id: &str,
    title: &str,
    genres: &[&str],
    content_type: ContentType,
    added_days_ago: i64,
) -> MediaItem {
    MediaItem::new(
        MediaId::new(id).unwrap(),
        MediaTitle::new(title).unwrap(),
        Url::parse(&format!("https://cdn.example.com/thumbs/{id}.jpg")).unwrap(),
        content_type,
        base_time() - Duration::days(added_days_ago),
    )
    .with_genres(genres.iter().copied())
}

pub fn movie(title: &str, genres: &[&str]) -> MediaItem {
    item(&title.to_lowercase(), title, genres, ContentType::Movie, 0)
}

/// Mixed catalog used by the property-style tests.
pub fn sample_catalog() -> Vec<MediaItem> {
    vec![
        item("m1", "Midnight Run", &["Action", "Comedy"], ContentType::Movie, 40),
        item("s1", "the crown", &["Drama", "History"], ContentType::Series, 3),
        item("m2", "Arrival", &["Science Fiction", "Drama"], ContentType::Movie, 12),
        item("s2", "Dark", &["Science Fiction", "Mystery"], ContentType::Series, 1),
        item("m3", "Heat", &["Crime", "Drama"], ContentType::Movie, 90),
        item("s3", "Night Manager", &["Drama", "Thriller"], ContentType::Series, 7),
        item("m4", "arrival", &["Documentary"], ContentType::Movie, 12),
        item("m5", "Amélie", &["Comedy", "Romance"], ContentType::Movie, 200),
        item("s4", "Fleabag", &["Comedy"], ContentType::Series, 30),
        item("m6", "Nightcrawler", &["Crime", "Thriller"], ContentType::Movie, 5),
        item("m7", "Zodiac", &["Crime", "Mystery"], ContentType::Movie, 60),
        item("s5", "Chernobyl", &["Drama", "History"], ContentType::Series, 14),
    ]
}
