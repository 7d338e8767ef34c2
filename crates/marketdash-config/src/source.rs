//! Lookup helpers shared by the config sections.
//!
//! Every section is built from a `Fn(&str) -> Option<String>` so tests can
//! feed a map instead of mutating the process environment.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub(crate) fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

pub(crate) fn optional<F>(lookup: &F, name: &'static str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parsed_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, name) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(name, &raw, e.to_string())),
        None => Ok(default),
    }
}

pub(crate) fn duration_or<F>(
    lookup: &F,
    name: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, name) {
        Some(raw) => parse_duration(&raw).map_err(|reason| ConfigError::invalid(name, &raw, reason)),
        None => Ok(default),
    }
}

pub(crate) fn bool_or<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, name) {
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::invalid(name, &raw, "expected true or false")),
        },
        None => Ok(default),
    }
}

/// Parses `<n>`, `<n>s`, `<n>m`, `<n>h` or `<n>d`. A bare number is seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| "expected a whole number followed by s, m, h or d".to_string())?;

    let seconds = match unit {
        "" | "s" => Some(amount),
        "m" => amount.checked_mul(60),
        "h" => amount.checked_mul(60 * 60),
        "d" => amount.checked_mul(24 * 60 * 60),
        other => return Err(format!("unknown unit {other:?}")),
    }
    .ok_or_else(|| "duration is too large".to_string())?;

    if seconds == 0 {
        return Err("duration must be positive".to_string());
    }

    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_duration_units() {
        let cases = [
            ("90", 90),
            ("45s", 45),
            ("15m", 900),
            ("24h", 86_400),
            ("7d", 604_800),
        ];
        for (raw, secs) in cases {
            assert_eq!(parse_duration(raw).unwrap(), Duration::from_secs(secs), "{raw}");
        }
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for raw in ["", "h", "12x", "1.5h", "-3m", "0s"] {
            assert!(parse_duration(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_required_treats_blank_as_missing() {
        let env = env_of(&[("DATABASE_URL", "   ")]);
        assert_eq!(
            required(&env, "DATABASE_URL"),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn test_bool_or() {
        let env = env_of(&[("A", "FALSE"), ("B", "yes"), ("C", "maybe")]);
        assert!(!bool_or(&env, "A", true).unwrap());
        assert!(bool_or(&env, "B", false).unwrap());
        assert!(bool_or(&env, "C", false).is_err());
        assert!(bool_or(&env, "D", true).unwrap());
    }
}
