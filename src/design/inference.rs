//! Experiment discovery by longest-common-substring clustering.
//!
//! Replicates of one condition usually differ only by a trailing index
//! (`Control_1`, `Control_2`). Each identifier is keyed by the longest
//! substring it shares with any other identifier; identifiers with equal
//! keys form one experiment. No delimiter convention is assumed.

use serde::Serialize;

use super::ReplicateMap;

/// A clustering tie: several distinct substrings of equal, maximal length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguityFlag {
    /// Identifier whose cluster key was ambiguous
    pub identifier: String,
    /// Key that was chosen (lexicographically smallest)
    pub label: String,
    /// All distinct candidates of the maximal length, sorted
    pub competing: Vec<String>,
}

/// Outcome of clustering a set of identifiers
#[derive(Debug, Clone, Default)]
pub struct Clustering {
    pub replicates: ReplicateMap,
    pub ambiguities: Vec<AmbiguityFlag>,
}

/// Longest contiguous substring of `a` that also occurs in `b`.
///
/// Case-sensitive and character based. Among several longest matches the
/// one starting earliest in `a` is returned. Returns `""` when the strings
/// share no character.
pub fn longest_common_substring<'a>(a: &'a str, b: &str) -> &'a str {
    let a_chars: Vec<(usize, char)> = a.char_indices().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() || b_chars.is_empty() {
        return "";
    }

    let mut prev = vec![0usize; b_chars.len() + 1];
    let mut curr = vec![0usize; b_chars.len() + 1];
    let mut best_len = 0;
    let mut best_end = 0;

    for (i, (_, ca)) in a_chars.iter().enumerate() {
        for (j, cb) in b_chars.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best_len {
                best_len = curr[j + 1];
                best_end = i + 1;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    if best_len == 0 {
        return "";
    }
    let start = a_chars[best_end - best_len].0;
    let end = a_chars
        .get(best_end)
        .map(|(offset, _)| *offset)
        .unwrap_or(a.len());
    &a[start..end]
}

/// Cluster key of `identifier` against all other identifiers
fn cluster_key(identifier: &str, identifiers: &[String]) -> (String, Option<AmbiguityFlag>) {
    let mut best_len = 0;
    let mut tied: Vec<&str> = Vec::new();

    for other in identifiers.iter().filter(|o| o.as_str() != identifier) {
        let overlap = longest_common_substring(identifier, other);
        let len = overlap.chars().count();
        if len == 0 || len < best_len {
            continue;
        }
        if len > best_len {
            best_len = len;
            tied.clear();
        }
        if !tied.contains(&overlap) {
            tied.push(overlap);
        }
    }

    tied.sort_unstable();
    let Some(label) = tied.first().map(|s| s.to_string()) else {
        return (String::new(), None);
    };

    let flag = (tied.len() > 1).then(|| AmbiguityFlag {
        identifier: identifier.to_string(),
        label: label.clone(),
        competing: tied.iter().map(|s| s.to_string()).collect(),
    });
    (label, flag)
}

/// Partition `identifiers` into experiments.
///
/// Identifiers should be ordered longest first (see
/// [`extract_identifiers`](crate::table::extract_identifiers)); group and
/// member order follow that input order. Clusters left with one member, and
/// identifiers sharing nothing with any other, are named after the
/// identifier itself.
pub fn infer_groups(identifiers: &[String]) -> Clustering {
    let mut clusters: Vec<(String, Vec<&str>)> = Vec::new();
    let mut ambiguities = Vec::new();

    for identifier in identifiers {
        let (key, flag) = cluster_key(identifier, identifiers);
        if let Some(flag) = flag {
            ambiguities.push(flag);
        }
        match clusters.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(identifier.as_str()),
            None => clusters.push((key, vec![identifier.as_str()])),
        }
    }

    let mut replicates = ReplicateMap::new();
    for (key, members) in &clusters {
        if key.is_empty() || members.len() == 1 {
            for member in members {
                replicates.push_replicate(member, member);
            }
        } else {
            for member in members {
                replicates.push_replicate(key, member);
            }
        }
    }

    Clustering {
        replicates,
        ambiguities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lcs_basic() {
        assert_eq!(longest_common_substring("Control_1", "Control_2"), "Control_");
        assert_eq!(longest_common_substring("abc", "xyz"), "");
        assert_eq!(longest_common_substring("", "xyz"), "");
        assert_eq!(longest_common_substring("WT_1", "wt_1"), "_1");
    }

    #[test]
    fn test_lcs_prefers_earliest_in_first_argument() {
        // "ab" and "cd" are both length 2; "ab" starts first in a
        assert_eq!(longest_common_substring("ab-cd", "cd+ab"), "ab");
    }

    #[test]
    fn test_lcs_multibyte() {
        assert_eq!(longest_common_substring("Probe_ä1", "Probe_ä2"), "Probe_ä");
    }

    #[test]
    fn test_infer_two_conditions() {
        let clustering = infer_groups(&ids(&["WT_1", "WT_2", "KO_1", "KO_2"]));
        let groups = clustering.replicates.groups();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "WT_");
        assert_eq!(groups[0].replicates, vec!["WT_1", "WT_2"]);
        assert_eq!(groups[1].name, "KO_");
        assert_eq!(groups[1].replicates, vec!["KO_1", "KO_2"]);
        assert!(clustering.ambiguities.is_empty());
    }

    #[test]
    fn test_singleton_is_named_after_itself() {
        let clustering = infer_groups(&ids(&["Control_1", "Control_2", "Blank"]));
        let names = clustering.replicates.experiment_names();

        assert_eq!(names, vec!["Control_", "Blank"]);
        assert_eq!(clustering.replicates.get("Blank").unwrap(), ["Blank"]);
    }

    #[test]
    fn test_unrelated_identifiers_stay_separate() {
        let clustering = infer_groups(&ids(&["abc", "xyz"]));
        assert_eq!(clustering.replicates.experiment_names(), vec!["abc", "xyz"]);
    }

    #[test]
    fn test_single_identifier() {
        let clustering = infer_groups(&ids(&["only"]));
        assert_eq!(clustering.replicates.experiment_names(), vec!["only"]);
    }

    #[test]
    fn test_tie_picks_lexicographic_smallest_and_flags() {
        // "ab-cd" shares "cd" with "cd+" and "ab" with "+ab"
        let clustering = infer_groups(&ids(&["ab-cd", "cd+", "+ab"]));
        let flag = clustering
            .ambiguities
            .iter()
            .find(|f| f.identifier == "ab-cd")
            .unwrap();

        assert_eq!(flag.label, "ab");
        assert_eq!(flag.competing, vec!["ab", "cd"]);
        assert_eq!(clustering.replicates.experiment_of("ab-cd"), Some("ab"));
    }

    #[test]
    fn test_inferred_groups_are_a_partition() {
        let input = ids(&["Ctrl_10", "Ctrl_1", "Ctrl_2", "Drug_1", "Drug_2", "X"]);
        let clustering = infer_groups(&input);

        clustering.replicates.check_partition().unwrap();
        let mut covered: Vec<&str> = clustering.replicates.identifiers().collect();
        covered.sort_unstable();
        let mut expected: Vec<&str> = input.iter().map(String::as_str).collect();
        expected.sort_unstable();
        assert_eq!(covered, expected);
    }
}
