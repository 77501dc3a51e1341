use strsim::levenshtein;

/// Find the existing title that most closely resembles `target`: an exact
/// match ignoring case, or one within two edits.
pub fn find_similar_title<'a>(target: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let lowered = target.to_lowercase();
    candidates
        .iter()
        .map(|&candidate| {
            let distance = if candidate.to_lowercase() == lowered {
                0
            } else {
                levenshtein(target, candidate)
            };
            (candidate, distance)
        })
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(title, _)| title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_similar_title() {
        let candidates = vec!["Reading", "medium", "Archive later"];

        assert_eq!(find_similar_title("Medium", &candidates), Some("medium"));

        assert_eq!(find_similar_title("Readings", &candidates), Some("Reading"));

        // Very different title should return None
        assert_eq!(find_similar_title("Podcasts", &candidates), None);
    }
}
