//! Order-preserving removal of duplicate versions

use std::collections::HashSet;

/// Marker appended to versions the user installed recently when listing them
pub const RECENT_MARKER: &str = " *recent";

/// Removes duplicates, keeping the first occurrence of each version
///
/// `1.2.3` and `1.2.3 *recent` count as the same version. Whichever appears
/// first is kept verbatim.
pub fn dedupe(versions: Vec<String>) -> Vec<String> {
    let mut encountered = HashSet::new();
    versions
        .into_iter()
        .filter(|v| encountered.insert(version_only(v).to_string()))
        .collect()
}

fn version_only(version: &str) -> &str {
    let version = version.trim();
    version
        .strip_suffix(RECENT_MARKER.trim_start())
        .map(str::trim_end)
        .unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(&["1.2.3", "1.2.3 *recent", "1.2.4"], &["1.2.3", "1.2.4"])]
    #[case(&["1.2.3 *recent", "1.2.3", "1.2.4"], &["1.2.3 *recent", "1.2.4"])]
    #[case(&["1.2.4", "1.2.3", "1.2.4", "1.2.3"], &["1.2.4", "1.2.3"])]
    #[case(&["1.0.0-rc1", "1.0.0-rc1 *recent"], &["1.0.0-rc1"])]
    #[case(&[], &[])]
    fn dedupe_keeps_first_occurrence_in_order(
        #[case] input: &[&str],
        #[case] expected: &[&str],
    ) {
        assert_eq!(dedupe(strings(input)), strings(expected));
    }

    #[test]
    fn dedupe_does_not_eat_pre_release_suffix_letters() {
        // "rc" and "recent" share letters; only the full marker is stripped
        assert_eq!(
            dedupe(strings(&["1.0.0-rc", "1.0.0"])),
            strings(&["1.0.0-rc", "1.0.0"])
        );
    }
}
