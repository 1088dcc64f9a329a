//! Date -> ordered bucket index used twice by every course

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use crate::assignment::AssignmentKey;
use crate::date::Date;
use crate::types::AssignmentId;

#[derive(Debug, Clone, Default)]
pub(crate) struct DateIndex {
    buckets: BTreeMap<Date, BTreeSet<AssignmentKey>>,
}

impl DateIndex {
    /// Insert into the bucket for `date`, creating it if absent.
    /// Returns false if the key was already there.
    pub(crate) fn insert(&mut self, date: Date, key: AssignmentKey) -> bool {
        self.buckets.entry(date).or_default().insert(key)
    }

    /// Remove from the bucket for `date`, dropping the bucket once empty
    pub(crate) fn remove(&mut self, date: Date, key: &AssignmentKey) -> bool {
        let Some(bucket) = self.buckets.get_mut(&date) else {
            return false;
        };
        let removed = bucket.remove(key);
        if bucket.is_empty() {
            self.buckets.remove(&date);
        }
        removed
    }

    pub(crate) fn contains(&self, date: Date, key: &AssignmentKey) -> bool {
        self.buckets
            .get(&date)
            .is_some_and(|bucket| bucket.contains(key))
    }

    /// Ids in the bucket for `date`, in display order
    pub(crate) fn bucket(&self, date: Date) -> impl Iterator<Item = AssignmentId> + '_ {
        self.buckets
            .get(&date)
            .into_iter()
            .flatten()
            .map(|key| key.id)
    }

    /// Ids of every bucket in `range`, ordered by date then display order
    pub(crate) fn range(
        &self,
        range: RangeInclusive<Date>,
    ) -> impl Iterator<Item = AssignmentId> + '_ {
        self.buckets
            .range(range)
            .flat_map(|(_, bucket)| bucket.iter().map(|key| key.id))
    }

    #[cfg(test)]
    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
