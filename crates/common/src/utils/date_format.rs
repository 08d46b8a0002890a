//! Serde codec for calendar dates in `dd-MM-yyyy` form, e.g. `22-02-1999`.
//!
//! Use with `#[serde(with = "common::utils::date_format")]` on a `NaiveDate`
//! field, or `date_format::option` on an `Option<NaiveDate>`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%d-%m-%Y";

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

fn parse(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, FORMAT)
        .map_err(|e| format!("invalid date `{raw}`, expected dd-MM-yyyy: {e}"))
}

pub mod option {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.collect_str(&d.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
