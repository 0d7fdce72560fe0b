//! Response parsing and time normalization
//!
//! Turns the raw completion text into an ordered sequence of
//! [`PathSample`]s. Parsing is all-or-nothing: any decode or validation
//! failure aborts the whole parse and partial results are never returned.
//!
//! The wall clock is read exactly once per parse, so given that single read
//! plus the deltas the result is fully deterministic. Tests use
//! [`parse_response_at`] to supply the base instant explicitly.

use chrono::Utc;

use crate::error::{CursorweaveError, Result};
use crate::schema::validate_points;
use crate::types::PathSample;

/// Parses the raw completion text into timestamped samples.
///
/// `timestamp_delta` is added to the current time to form the base timestamp
/// assigned to the first sample. Each subsequent sample's timestamp is the
/// previous timestamp plus its own `delta_time`. Negative deltas are not
/// clamped; a misbehaving model can produce non-monotonic timestamps and
/// they are passed through as-is.
pub fn parse_response(raw: &str, timestamp_delta: i64) -> Result<Vec<PathSample>> {
    parse_response_at(raw, timestamp_delta, Utc::now().timestamp_millis())
}

/// Like [`parse_response`], but with an explicit base instant instead of the
/// wall clock.
pub fn parse_response_at(raw: &str, timestamp_delta: i64, now_ms: i64) -> Result<Vec<PathSample>> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|error| CursorweaveError::MalformedInput(error.to_string()))?;

    let points = validate_points(&value)?;

    let base_time = now_ms + timestamp_delta;
    let mut samples = Vec::with_capacity(points.len());
    let mut previous = base_time;

    for (index, point) in points.into_iter().enumerate() {
        let timestamp = if index == 0 {
            base_time
        } else {
            previous + point.delta_time.round() as i64
        };
        previous = timestamp;

        samples.push(PathSample {
            x: point.x,
            y: point.y,
            delta_time: point.delta_time,
            timestamp,
        });
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_parses_single_point() {
        let before = Utc::now().timestamp_millis();
        let raw = json!([{ "x": 0.0, "y": 100.0, "deltaTime": 0.0 }]).to_string();

        let samples = parse_response(&raw, 0).unwrap();
        let after = Utc::now().timestamp_millis();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].x, 0.0);
        assert_eq!(samples[0].y, 100.0);
        assert!(samples[0].timestamp >= before);
        assert!(samples[0].timestamp <= after);
    }

    #[test]
    fn test_accumulates_deltas() {
        let raw = json!([
            { "x": 0.0, "y": 0.0, "deltaTime": 0.0 },
            { "x": 10.0, "y": 10.0, "deltaTime": 50.0 }
        ])
        .to_string();

        let samples = parse_response_at(&raw, 0, NOW).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp, NOW);
        assert_eq!(samples[1].timestamp, samples[0].timestamp + 50);
    }

    #[test]
    fn test_applies_timestamp_delta() {
        let raw = json!([{ "x": 1.0, "y": 2.0, "deltaTime": 0.0 }]).to_string();

        let samples = parse_response_at(&raw, 250, NOW).unwrap();
        assert_eq!(samples[0].timestamp, NOW + 250);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let raw = format!(
            "  \n{}\n  ",
            json!([{ "x": 0.0, "y": 0.0, "deltaTime": 0.0 }])
        );

        assert_eq!(parse_response_at(&raw, 0, NOW).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_non_json_input() {
        let err = parse_response("INVALID", 0).unwrap_err();
        assert!(matches!(err, CursorweaveError::MalformedInput(_)));
    }

    #[test]
    fn test_rejects_invalid_shape() {
        let raw = json!([{ "x": 0.0, "y": 0.0 }]).to_string();

        let err = parse_response(&raw, 0).unwrap_err();
        assert!(matches!(err, CursorweaveError::SchemaValidation(_)));
    }

    #[test]
    fn test_empty_array_parses_to_empty() {
        assert!(parse_response_at("[]", 0, NOW).unwrap().is_empty());
    }

    #[test]
    fn test_negative_delta_passes_through() {
        let raw = json!([
            { "x": 0.0, "y": 0.0, "deltaTime": 0.0 },
            { "x": 5.0, "y": 5.0, "deltaTime": -20.0 }
        ])
        .to_string();

        let samples = parse_response_at(&raw, 0, NOW).unwrap();
        assert_eq!(samples[1].delta_time, -20.0);
        assert_eq!(samples[1].timestamp, NOW - 20);
    }

    proptest! {
        #[test]
        fn prop_timestamps_fold_over_deltas(
            points in prop::collection::vec(
                (-1000.0f64..1000.0, -1000.0f64..1000.0, 0.0f64..10_000.0),
                1..64,
            ),
            delta in -10_000i64..10_000,
        ) {
            let body: Vec<_> = points
                .iter()
                .map(|(x, y, dt)| json!({ "x": x, "y": y, "deltaTime": dt }))
                .collect();
            let raw = serde_json::Value::Array(body).to_string();

            let samples = parse_response_at(&raw, delta, NOW).unwrap();

            prop_assert_eq!(samples.len(), points.len());
            prop_assert_eq!(samples[0].timestamp, NOW + delta);
            for i in 1..samples.len() {
                prop_assert_eq!(
                    samples[i].timestamp,
                    samples[i - 1].timestamp + samples[i].delta_time.round() as i64
                );
            }
        }
    }
}
