use serde::de::{Error, Visitor};
use serde::{Deserializer, Serializer};

pub mod humantime {
    use std::time::Duration;

    use super::*;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(&::humantime::format_duration(*value))
        } else {
            serde::Serialize::serialize(value, serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(DurationVisitor)
        } else {
            serde::Deserialize::deserialize(deserializer)
        }
    }

    struct DurationVisitor;

    impl Visitor<'_> for DurationVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a duration")
        }

        fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
            ::humantime::parse_duration(v)
                .map_err(|_e| E::invalid_value(serde::de::Unexpected::Str(v), &self))
        }
    }
}
