//! Canned malformed payloads.
//!
//! Each entry is either invalid JSON outright or valid JSON that fails the
//! reading schema (wrong types, missing fields, null, empty). The set is
//! fixed so client-side parser tests can enumerate what they must survive.

use rand::Rng;

/// Bodies served with HTTP 200 by the malformed scenario and `/malformed`.
pub const MALFORMED_PAYLOADS: &[&str] = &[
    // Invalid glucose value
    r#"{"sgv": "not_a_number", "date": 123}"#,
    // Invalid date
    r#"{"sgv": 120, "date": "not_a_date"}"#,
    // Missing required field
    r#"{"missing_sgv": 120}"#,
    // Null glucose value
    r#"{"sgv": null}"#,
    // Broken JSON
    r#"{invalid json syntax"#,
    // Empty response
    "",
    // JSON null
    "null",
    // Empty array
    "[]",
];

/// Pick one payload uniformly.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MALFORMED_PAYLOADS[rng.gen_range(0..MALFORMED_PAYLOADS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glucose::Reading;

    /// Every payload must fail strict decoding into a non-empty reading array.
    #[test]
    fn no_payload_decodes_as_readings() {
        for payload in MALFORMED_PAYLOADS {
            let decoded = serde_json::from_str::<Vec<Reading>>(payload);
            let looks_valid = decoded.map(|r| !r.is_empty()).unwrap_or(false);
            assert!(!looks_valid, "payload decoded as readings: {payload}");
        }
    }

    #[test]
    fn pick_covers_the_whole_set() {
        let mut rng = rand::thread_rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1_000 {
            seen.insert(pick(&mut rng));
        }
        assert_eq!(seen.len(), MALFORMED_PAYLOADS.len());
    }
}
