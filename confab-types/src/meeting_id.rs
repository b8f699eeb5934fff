// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meeting-room identifiers.
//!
//! Rooms are identified by short URL path segments. Identifiers are
//! generated client-side and never registered anywhere: uniqueness is
//! probabilistic (birthday bound over two 36^5 segments), and knowing an id
//! grants access unless the meeting server's lobby is enabled. Joining
//! accepts any non-empty id, since the meeting server is the source of
//! truth for room existence.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SEGMENT_LEN: usize = 5;

/// A validated meeting-room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingId(String);

impl MeetingId {
    /// Generate a fresh identifier of the form `xxxxx-xxxxx` from two
    /// independent base-36 segments.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self(format!("{}-{}", segment(&mut rng), segment(&mut rng)))
    }

    /// Accept a user-supplied id for joining. Surrounding whitespace is
    /// trimmed; an empty result is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn segment(rng: &mut impl Rng) -> String {
    (0..SEGMENT_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn has_generated_shape(id: &str) -> bool {
        let parts: Vec<&str> = id.split('-').collect();
        parts.len() == 2
            && parts.iter().all(|p| {
                p.len() == SEGMENT_LEN
                    && p.bytes()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            })
    }

    #[test]
    fn generated_ids_have_the_documented_shape() {
        for _ in 0..100 {
            let id = MeetingId::generate();
            assert!(has_generated_shape(id.as_str()), "bad id: {id}");
        }
    }

    #[test]
    fn generated_ids_round_trip_through_parse() {
        let id = MeetingId::generate();
        assert_eq!(MeetingId::parse(id.as_str()), Some(id));
    }

    #[test]
    fn no_duplicates_over_ten_thousand_trials() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(MeetingId::generate()));
        }
    }

    #[test]
    fn parse_trims_and_rejects_empty() {
        assert_eq!(
            MeetingId::parse("  standup-2024  ").unwrap().as_str(),
            "standup-2024"
        );
        assert_eq!(MeetingId::parse(""), None);
        assert_eq!(MeetingId::parse("   "), None);
    }
}
