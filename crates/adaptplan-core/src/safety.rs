/// Banned claim phrases, lower-case. Flags are reported in this order.
pub const BANNED_CLAIMS: [&str; 7] = [
    "cure autism",
    "guaranteed results",
    "100% success",
    "reverse autism",
    "replace medical advice",
    "diagnose",
    "medicate without doctor",
];

/// Scan text for banned claims and return one flag per phrase found.
///
/// Matching is a case-insensitive substring search. Flag order follows
/// [`BANNED_CLAIMS`], not the position of the phrase in `text`.
pub fn safety_scan(text: &str) -> Vec<String> {
    banned_claims_in(text)
        .into_iter()
        .map(banned_claim_flag)
        .collect()
}

/// Return the denylist phrases contained in `text`.
pub fn banned_claims_in(text: &str) -> Vec<&'static str> {
    let low = text.to_lowercase();
    BANNED_CLAIMS
        .iter()
        .copied()
        .filter(|phrase| low.contains(phrase))
        .collect()
}

/// Flag string for a single banned phrase.
pub fn banned_claim_flag(phrase: &str) -> String {
    format!("Contains banned claim: '{phrase}'")
}
