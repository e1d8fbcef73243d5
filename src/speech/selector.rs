//! Gender-heuristic voice selection.
//!
//! Voices are matched by name substring against a fixed allow-list. This is
//! a heuristic inherited from desktop speech engines whose voice names embed
//! a gendered label or a conventional first name; on many hosts and locales
//! nothing matches, and selection falls back to the first catalog voice.

use super::voice::{Voice, VoiceCatalog, VoiceGender};
use rand::Rng;

/// Name substrings treated as male-indicative.
const MALE_NAME_HINTS: [&str; 3] = ["male", "john", "david"];

/// Name substrings treated as female-indicative.
const FEMALE_NAME_HINTS: [&str; 3] = ["female", "susan", "emma"];

/// The random pick is restricted to the first this-many filtered voices.
const MAX_PICK_POOL: usize = 10;

/// Lower bound of the per-utterance pitch/rate jitter.
const JITTER_MIN: f32 = 0.9;

/// Upper bound of the per-utterance pitch/rate jitter.
const JITTER_MAX: f32 = 1.1;

/// Whether a voice name contains a gender-indicative substring.
///
/// Note that `"female"` contains `"male"`, so female-named voices also match
/// the male hint list. That ambiguity is inherent to the name-substring
/// heuristic.
fn name_matches(name: &str, gender: VoiceGender) -> bool {
    let name = name.to_lowercase();
    let hints: &[&str] = match gender {
        VoiceGender::Male => &MALE_NAME_HINTS,
        VoiceGender::Female => &FEMALE_NAME_HINTS,
    };
    hints.iter().any(|hint| name.contains(hint))
}

/// Filter a voice list to those matching the requested gender, in stable
/// engine order.
pub fn filter_by_gender(voices: &[Voice], gender: VoiceGender) -> Vec<&Voice> {
    voices
        .iter()
        .filter(|v| name_matches(&v.name, gender))
        .collect()
}

/// Pick a voice for the requested gender.
///
/// Uniformly random over the first [`MAX_PICK_POOL`] gender-matching voices;
/// falls back to the first catalog voice when nothing matches. Returns
/// `None` only when the catalog itself is empty.
pub fn pick_voice<'a, R: Rng>(
    catalog: &'a VoiceCatalog,
    gender: VoiceGender,
    rng: &mut R,
) -> Option<&'a Voice> {
    let filtered = filter_by_gender(catalog.voices(), gender);
    if filtered.is_empty() {
        return catalog.first();
    }
    let pool = &filtered[..filtered.len().min(MAX_PICK_POOL)];
    Some(pool[rng.gen_range(0..pool.len())])
}

/// Draw one pitch or rate value, uniform in [0.9, 1.1].
pub fn jitter<R: Rng>(rng: &mut R) -> f32 {
    rng.gen_range(JITTER_MIN..=JITTER_MAX)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(names: &[&str]) -> VoiceCatalog {
        let mut c = VoiceCatalog::new();
        c.replace(names.iter().map(|n| Voice::new(*n, "en-US")).collect());
        c
    }

    #[test]
    fn filter_matches_hints_case_insensitively() {
        let voices = [
            Voice::new("Microsoft David - English (United States)", "en-US"),
            Voice::new("Google UK English Female", "en-GB"),
            Voice::new("Aurora", "en-US"),
        ];
        let male = filter_by_gender(&voices, VoiceGender::Male);
        assert_eq!(male.len(), 2); // "David" and "feMALE" both contain a male hint
        let female = filter_by_gender(&voices, VoiceGender::Female);
        assert_eq!(female.len(), 1);
        assert_eq!(female[0].name, "Google UK English Female");
    }

    #[test]
    fn pick_is_restricted_to_first_ten_matches() {
        let names: Vec<String> = (0..20).map(|i| format!("Emma {i}")).collect();
        let c = catalog(&names.iter().map(String::as_str).collect::<Vec<_>>());

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let voice = pick_voice(&c, VoiceGender::Female, &mut rng).unwrap();
            let index: usize = voice.name.strip_prefix("Emma ").unwrap().parse().unwrap();
            assert!(index < 10, "picked {index}, outside the first 10");
        }
    }

    #[test]
    fn no_match_falls_back_to_first_voice() {
        let c = catalog(&["Aurora", "Zephyr"]);
        let mut rng = StdRng::seed_from_u64(1);
        let voice = pick_voice(&c, VoiceGender::Male, &mut rng).unwrap();
        assert_eq!(voice.name, "Aurora");
    }

    #[test]
    fn empty_catalog_yields_none() {
        let c = VoiceCatalog::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_voice(&c, VoiceGender::Female, &mut rng).is_none());
    }

    #[test]
    fn jitter_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let value = jitter(&mut rng);
            assert!((0.9..=1.1).contains(&value), "jitter {value} out of range");
        }
    }
}
