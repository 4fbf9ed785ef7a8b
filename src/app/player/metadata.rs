use std::collections::HashMap;

use thiserror::Error;
use zbus::zvariant::{OwnedValue, Value};

/// Cover art hosted on Spotify's image CDN
pub const REMOTE_ART_PREFIX: &str = "https://i.scdn.co/image/";
/// Cover art stored on the local filesystem
pub const LOCAL_ART_PREFIX: &str = "file://";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

const TITLE_KEY: &str = "xesam:title";
const ARTIST_KEY: &str = "xesam:artist";
const LENGTH_KEY: &str = "mpris:length";
const ART_URL_KEY: &str = "mpris:artUrl";

const MICROS_PER_SECOND: i64 = 1_000_000;

/// A decoded snapshot of the current track. Replaced every tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub length_secs: i64,
    pub position_secs: i64,
    /// Empty, an absolute local path, or a remote CDN URL
    pub art_reference: String,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("player property query failed: {0}")]
    Bus(#[from] zbus::fdo::Error),
    #[error("player metadata is not a dictionary: {0}")]
    UnexpectedShape(#[source] zbus::zvariant::Error),
    #[error("{field} has unsupported type '{signature}'")]
    UnsupportedNumeric {
        field: &'static str,
        signature: String,
    },
}

/// Source of track metadata polled by the event loop
pub trait MetadataSource {
    async fn fetch_metadata(&self) -> Result<TrackMetadata, MetadataError>;
}

/// Decode the player's metadata dictionary and position into a [`TrackMetadata`].
pub fn decode_metadata(
    fields: &HashMap<String, OwnedValue>,
    position: &Value<'_>,
) -> Result<TrackMetadata, MetadataError> {
    let title = fields
        .get(TITLE_KEY)
        .and_then(|v| as_str(v))
        .map(sanitize_string)
        .unwrap_or_default();

    let artist = fields
        .get(ARTIST_KEY)
        .and_then(|v| first_artist(v))
        .map(sanitize_string)
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let length = match fields.get(LENGTH_KEY) {
        Some(value) => micros(value, LENGTH_KEY)?,
        None => 0,
    };
    let position = micros(position, "position")?;

    let art_reference = fields
        .get(ART_URL_KEY)
        .and_then(|v| as_str(v))
        .map(normalize_art_reference)
        .unwrap_or_default();

    Ok(TrackMetadata {
        title,
        artist,
        length_secs: (length / MICROS_PER_SECOND).max(0),
        position_secs: (position / MICROS_PER_SECOND).max(0),
        art_reference,
    })
}

/// Reduce a raw `mpris:artUrl` to something the artwork pipeline can fetch.
///
/// CDN URLs are kept, `file://` URIs become bare paths, anything else is
/// dropped.
pub fn normalize_art_reference(raw: &str) -> String {
    let raw = raw.trim_matches('"');
    if raw.starts_with(REMOTE_ART_PREFIX) {
        raw.to_string()
    } else if let Some(path) = raw.strip_prefix(LOCAL_ART_PREFIX) {
        path.to_string()
    } else {
        if !raw.is_empty() {
            log::debug!("Ignoring unsupported art URL: {}", raw);
        }
        String::new()
    }
}

/// Replace control and invisible characters that would corrupt the terminal
pub fn sanitize_string(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{0000}'..='\u{001F}'
            | '\u{007F}'..='\u{009F}'
            | '\u{00AD}'
            | '\u{200B}'
            | '\u{200C}'
            | '\u{200D}'
            | '\u{2060}'
            | '\u{FEFF}' => ' ',
            _ => c,
        })
        .collect()
}

/// Strip variant wrappers
fn peel<'a, 'v>(value: &'a Value<'v>) -> &'a Value<'v> {
    match value {
        Value::Value(inner) => peel(inner),
        other => other,
    }
}

fn as_str<'a>(value: &'a Value<'_>) -> Option<&'a str> {
    match peel(value) {
        Value::Str(s) => Some(s.as_str()),
        _ => None,
    }
}

fn first_artist<'a>(value: &'a Value<'_>) -> Option<&'a str> {
    match peel(value) {
        Value::Array(artists) => artists.iter().next().and_then(as_str),
        _ => None,
    }
}

fn micros(value: &Value<'_>, field: &'static str) -> Result<i64, MetadataError> {
    match peel(value) {
        Value::I64(v) => Ok(*v),
        Value::U64(v) => Ok(*v as i64),
        other => Err(MetadataError::UnsupportedNumeric {
            field,
            signature: other.value_signature().to_string(),
        }),
    }
}
