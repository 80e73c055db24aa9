use std::{
    cmp::Reverse,
    collections::{BTreeSet, HashMap},
};

/// A sorted set of members ranked by score, highest first.
///
/// Members with equal scores are ordered by member id, descending, the way a
/// reverse range over a Redis sorted set returns them.
#[derive(Debug, Default)]
pub(crate) struct RankedSet {
    scores: HashMap<String, i64>,
    order: BTreeSet<(Reverse<i64>, Reverse<String>)>,
}

impl RankedSet {
    /// Adds the member or moves it to its new score.
    pub fn upsert(&mut self, member: &str, score: i64) {
        if let Some(previous) = self.scores.insert(member.to_string(), score) {
            self.order
                .remove(&(Reverse(previous), Reverse(member.to_string())));
        }
        self.order.insert((Reverse(score), Reverse(member.to_string())));
    }

    pub fn iter_desc(&self) -> impl Iterator<Item = (&str, i64)> {
        self.order
            .iter()
            .map(|(Reverse(score), Reverse(member))| (member.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(set: &RankedSet) -> Vec<(&str, i64)> {
        set.iter_desc().collect()
    }

    #[test]
    fn test_ranked_set_orders_by_score_desc() {
        let mut set = RankedSet::default();
        set.upsert("p1", 50);
        set.upsert("p2", 80);
        set.upsert("p3", -10);

        assert_eq!(members(&set), vec![("p2", 80), ("p1", 50), ("p3", -10)]);
    }

    #[test]
    fn test_ranked_set_update_replaces_member() {
        let mut set = RankedSet::default();
        set.upsert("p1", 10);
        set.upsert("p2", 15);
        set.upsert("p1", 20);

        assert_eq!(set.len(), 2);
        assert_eq!(members(&set), vec![("p1", 20), ("p2", 15)]);
    }

    #[test]
    fn test_ranked_set_ties_by_member_desc() {
        let mut set = RankedSet::default();
        set.upsert("alice", 70);
        set.upsert("bob", 70);

        assert_eq!(members(&set), vec![("bob", 70), ("alice", 70)]);
    }
}
