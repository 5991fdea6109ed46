use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

use crate::services::time_codec::{format_instant, parse_instant};

/// Serializer for serde to render a chrono `DateTime<Utc>` as `YYYY-MM-DD HH:MM:SS`.
/// Used from struct fields with a serde `with` attribute pointing to this module.
pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_instant(date))
}

pub fn deserialize<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    parse_instant(&raw).map_err(D::Error::custom)
}

/// Same rendering for a whole axis of instants.
pub mod seq {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    use crate::services::time_codec::format_instant;

    pub fn serialize<S>(dates: &[DateTime<Utc>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(dates.iter().map(format_instant))
    }
}
