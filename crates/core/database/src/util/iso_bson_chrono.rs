//! Timestamps stored as BSON dates, read back from either BSON dates,
//! RFC 3339 strings or epoch milliseconds.

use std::fmt;

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::{Error as DeError, MapAccess, Visitor};
use serde::{Deserializer, Serializer};

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    chrono_datetime_as_bson_datetime::serialize(value, serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TimestampVisitor)
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a BSON date, an RFC 3339 string or epoch milliseconds")
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
        DateTime::parse_from_rfc3339(value)
            .map(|date| date.with_timezone(&Utc))
            .map_err(DeError::custom)
    }

    fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
        Utc.timestamp_millis_opt(value)
            .single()
            .ok_or_else(|| DeError::custom("timestamp out of range"))
    }

    fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
        let value = i64::try_from(value).map_err(DeError::custom)?;
        self.visit_i64(value)
    }

    fn visit_map<M: MapAccess<'de>>(self, map: M) -> Result<Self::Value, M::Error> {
        chrono_datetime_as_bson_datetime::deserialize(
            serde::de::value::MapAccessDeserializer::new(map),
        )
    }
}
