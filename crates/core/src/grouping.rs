//! Peer matching and play-group formation.
//!
//! Children are compared on age, interests (with a small table of related
//! interests), program and gender. `nearest_peers` ranks a roster against one
//! child; `form_groups` chunks those peers into play groups.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const DEFAULT_K: usize = 3;
pub const DEFAULT_MIN_GROUP_SIZE: usize = 2;
pub const DEFAULT_MAX_GROUP_SIZE: usize = 4;

const AGE_WEIGHT: f64 = 0.35;
const INTEREST_WEIGHT: f64 = 0.35;
const PROGRAM_WEIGHT: f64 = 0.2;
const GENDER_WEIGHT: f64 = 0.1;

const RELATED_INTERESTS: [(&str, &[&str]); 5] = [
    ("drawing", &["arts_crafts", "painting", "coloring", "creative_play"]),
    ("reading", &["storytelling", "pretend_play", "language_development"]),
    ("music", &["dancing", "singing", "rhythm_activities"]),
    ("building", &["blocks", "construction", "engineering", "problem_solving"]),
    ("outdoor", &["nature", "sports", "physical_activities", "exploration"]),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Years; fractional ages are allowed.
    pub age: f64,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeerMatch {
    pub child: ChildRecord,
    pub similarity: f64,
    pub compatibility: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayGroup {
    pub group_id: String,
    pub members: Vec<PeerMatch>,
    pub average_similarity: f64,
    pub common_interests: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupingParams {
    pub k: usize,
    pub min_group_size: usize,
    pub max_group_size: usize,
}

impl Default for GroupingParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            max_group_size: DEFAULT_MAX_GROUP_SIZE,
        }
    }
}

impl GroupingParams {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.k == 0 {
            return Err(DomainError::InvalidParameter("k must be at least 1".to_string()));
        }
        if self.min_group_size == 0 || self.min_group_size > self.max_group_size {
            return Err(DomainError::InvalidParameter(format!(
                "group size bounds must satisfy 1 <= min ({}) <= max ({})",
                self.min_group_size, self.max_group_size
            )));
        }
        Ok(())
    }
}

/// Weighted similarity in `[0, 1]`.
pub fn similarity(a: &ChildRecord, b: &ChildRecord) -> f64 {
    let age_similarity = (1.0 - (a.age - b.age).abs() / 6.0).max(0.0);
    let interest_similarity = interest_similarity(&a.interests, &b.interests).min(1.0);
    let program_similarity = if a.program == b.program { 1.0 } else { 0.3 };
    let gender_similarity = if a.gender == b.gender { 0.8 } else { 0.6 };

    let total = age_similarity * AGE_WEIGHT
        + interest_similarity * INTEREST_WEIGHT
        + program_similarity * PROGRAM_WEIGHT
        + gender_similarity * GENDER_WEIGHT;
    total.min(1.0)
}

/// Jaccard overlap plus related-interest bonuses; uncapped.
fn interest_similarity(a: &[String], b: &[String]) -> f64 {
    let left: HashSet<&str> = a.iter().map(String::as_str).collect();
    let right: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = left.union(&right).count();
    let mut score = if union == 0 {
        0.0
    } else {
        left.intersection(&right).count() as f64 / union as f64
    };

    for (main, related) in RELATED_INTERESTS {
        if left.contains(main) && right.contains(main) {
            score += 0.2;
        } else if left.contains(main) && related.iter().any(|r| right.contains(r)) {
            score += 0.1;
        }
    }
    score
}

fn age_compatibility(a: &ChildRecord, b: &ChildRecord) -> f64 {
    let diff = (a.age - b.age).abs();
    if diff <= 1.0 {
        1.0
    } else {
        (1.0 - (diff - 1.0) / 3.0).max(0.0)
    }
}

/// The `k` most compatible children in `roster`, excluding `target` itself.
pub fn nearest_peers(target: &ChildRecord, roster: &[ChildRecord], k: usize) -> Vec<PeerMatch> {
    let mut peers: Vec<PeerMatch> = roster
        .iter()
        .filter(|child| child.id != target.id)
        .map(|child| {
            let similarity = similarity(target, child);
            let compatibility = similarity * 0.7 + age_compatibility(target, child) * 0.3;
            PeerMatch { child: child.clone(), similarity, compatibility }
        })
        .collect();

    peers.sort_by(|a, b| {
        b.compatibility.partial_cmp(&a.compatibility).unwrap_or(std::cmp::Ordering::Equal)
    });
    peers.truncate(k);
    peers
}

/// Chunks peers (most similar first) into groups of at most `max_size`,
/// dropping any chunk smaller than `min_size`.
pub fn form_groups(
    mut peers: Vec<PeerMatch>,
    min_size: usize,
    max_size: usize,
) -> Vec<PlayGroup> {
    if max_size == 0 || peers.len() < min_size {
        return Vec::new();
    }

    peers.sort_by(|a, b| {
        b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut groups = Vec::new();
    for chunk in peers.chunks(max_size) {
        if chunk.len() < min_size {
            continue;
        }
        let average_similarity =
            chunk.iter().map(|peer| peer.similarity).sum::<f64>() / chunk.len() as f64;
        groups.push(PlayGroup {
            group_id: format!("group_{}", groups.len() + 1),
            members: chunk.to_vec(),
            average_similarity,
            common_interests: common_interests(chunk.iter().map(|peer| &peer.child)),
        });
    }
    groups
}

/// Interests held by at least two of `members`, sorted.
pub fn common_interests<'a>(members: impl IntoIterator<Item = &'a ChildRecord>) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for member in members {
        for interest in &member.interests {
            *counts.entry(interest.as_str()).or_insert(0) += 1;
        }
    }
    counts.into_iter().filter(|(_, count)| *count >= 2).map(|(name, _)| name.to_string()).collect()
}

/// Peers and groups for `target` in one call.
pub fn group_for(
    target: &ChildRecord,
    roster: &[ChildRecord],
    params: GroupingParams,
) -> Result<(Vec<PeerMatch>, Vec<PlayGroup>), DomainError> {
    params.validate()?;
    let peers = nearest_peers(target, roster, params.k);
    let groups = form_groups(peers.clone(), params.min_group_size, params.max_group_size);
    Ok((peers, groups))
}

#[cfg(test)]
mod tests {
    use super::{
        common_interests, form_groups, group_for, nearest_peers, similarity, ChildRecord,
        GroupingParams,
    };
    use crate::errors::DomainError;

    fn child(id: &str, age: f64, program: &str, interests: &[&str]) -> ChildRecord {
        ChildRecord {
            id: id.to_string(),
            name: format!("Child {id}"),
            age,
            gender: Some("f".to_string()),
            program: Some(program.to_string()),
            interests: interests.iter().map(|i| i.to_string()).collect(),
        }
    }

    #[test]
    fn identical_children_are_fully_similar_up_to_gender_weight() {
        let a = child("a", 3.0, "toddler", &["drawing"]);
        let b = child("b", 3.0, "toddler", &["drawing"]);

        // 0.35 + min(1 + 0.2, 1) * 0.35 + 0.2 + 0.08
        assert!((similarity(&a, &b) - 0.98).abs() < 1e-9);
    }

    #[test]
    fn related_interest_earns_partial_bonus() {
        let a = child("a", 4.0, "preschool", &["music"]);
        let b = child("b", 4.0, "preschool", &["singing"]);
        let c = child("c", 4.0, "preschool", &["blocks"]);

        assert!(similarity(&a, &b) > similarity(&a, &c));
        assert!((similarity(&a, &b) - similarity(&a, &c) - 0.035).abs() < 1e-9);
    }

    #[test]
    fn nearest_peers_excludes_target_and_ranks_by_compatibility() {
        let target = child("t", 3.0, "toddler", &["drawing", "music"]);
        let roster = vec![
            target.clone(),
            child("far", 8.0, "school", &["sports"]),
            child("close", 3.5, "toddler", &["drawing"]),
            child("mid", 4.0, "toddler", &["reading"]),
        ];

        let peers = nearest_peers(&target, &roster, 2);

        let ids: Vec<_> = peers.iter().map(|p| p.child.id.as_str()).collect();
        assert_eq!(ids, vec!["close", "mid"]);
    }

    #[test]
    fn groups_respect_size_bounds() {
        let target = child("t", 3.0, "toddler", &[]);
        let roster: Vec<_> =
            (0..5).map(|i| child(&format!("c{i}"), 3.0, "toddler", &["blocks"])).collect();

        let peers = nearest_peers(&target, &roster, 5);
        let groups = form_groups(peers, 2, 4);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 4);
        assert_eq!(groups[0].group_id, "group_1");
        assert_eq!(groups[0].common_interests, vec!["blocks".to_string()]);
    }

    #[test]
    fn too_few_peers_form_no_group() {
        let target = child("t", 3.0, "toddler", &[]);
        let peers = nearest_peers(&target, &[child("a", 3.0, "toddler", &[])], 3);

        assert!(form_groups(peers, 2, 4).is_empty());
    }

    #[test]
    fn common_interests_need_two_holders() {
        let members = [
            child("a", 3.0, "p", &["music", "drawing"]),
            child("b", 3.0, "p", &["music"]),
            child("c", 3.0, "p", &["outdoor", "drawing"]),
        ];

        assert_eq!(common_interests(&members), vec!["drawing".to_string(), "music".to_string()]);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let target = child("t", 3.0, "toddler", &[]);
        let params = GroupingParams { k: 3, min_group_size: 5, max_group_size: 2 };

        assert!(matches!(group_for(&target, &[], params), Err(DomainError::InvalidParameter(_))));
    }
}
