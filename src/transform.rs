//! Pure reshaping operations over [`Dataset`] values.
//!
//! Every transform consumes `&self` and returns a new dataset; the input is never
//! mutated and the output shares no columns with it. Operations that drop records
//! recompact both name tables so that no name survives without a referencing record.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::Dataset;
use crate::types::{LabelIndex, LabelName};

impl Dataset {
    /// Return a dataset without the records at `indices`.
    ///
    /// Indices outside `0..len()` are ignored. Both name tables are recompacted:
    /// names no longer referenced by a retained record are dropped, and surviving
    /// label indices are renumbered densely in ascending original order, so an
    /// empty removal set leaves the numbering unchanged.
    pub fn remove_indices(&self, indices: impl IntoIterator<Item = usize>) -> Dataset {
        debug_assert!(self.validate().is_ok());
        let dropped: HashSet<usize> = indices.into_iter().collect();
        let retained: Vec<usize> = (0..self.len()).filter(|i| !dropped.contains(i)).collect();

        let target1: Vec<LabelIndex> = retained.iter().map(|&i| self.target1[i]).collect();
        let target2: Vec<Option<LabelIndex>> = retained.iter().map(|&i| self.target2[i]).collect();
        let remap1 = LabelRemap::over(target1.iter().copied(), &self.target1_names);
        let remap2 = LabelRemap::over(target2.iter().flatten().copied(), &self.target2_names);

        Dataset {
            files: retained.iter().map(|&i| self.files[i].clone()).collect(),
            data: retained.iter().map(|&i| self.data[i].clone()).collect(),
            target1: target1.iter().map(|&index| remap1.renumber(index)).collect(),
            target2: target2
                .iter()
                .map(|value| value.map(|index| remap2.renumber(index)))
                .collect(),
            target1_names: remap1.names,
            target2_names: remap2.names,
        }
    }

    /// Drop every record whose second-level label is absent.
    pub fn filter_incomplete_subjects(&self) -> Dataset {
        let incomplete = (0..self.len()).filter(|&i| self.target2[i].is_none());
        self.remove_indices(incomplete)
    }

    /// Drop every record belonging to a second-level label group with fewer than
    /// `min_support` members. The absent marker counts as its own group.
    pub fn filter_small_subjects(&self, min_support: usize) -> Dataset {
        let dropped: Vec<usize> = self
            .group_by_target2()
            .values()
            .filter(|group| group.len() < min_support)
            .flatten()
            .copied()
            .collect();
        self.remove_indices(dropped)
    }

    /// Truncate every second-level label group to its first `max_documents`
    /// records in existing relative order. Groups at or below the cap are kept
    /// untouched.
    pub fn chop_large_subjects(&self, max_documents: usize) -> Dataset {
        let dropped: Vec<usize> = self
            .group_by_target2()
            .values()
            .flat_map(|group| group.iter().skip(max_documents))
            .copied()
            .collect();
        self.remove_indices(dropped)
    }

    /// Group record indices by label pair: `target1_name` → `target2_name` →
    /// record indices in dataset order.
    ///
    /// Records whose second-level label is absent carry no label pair and are
    /// omitted; run [`Dataset::filter_incomplete_subjects`] first to cover every
    /// record.
    pub fn subject_indices(&self) -> IndexMap<LabelName, IndexMap<LabelName, Vec<usize>>> {
        let mut mapping: IndexMap<LabelName, IndexMap<LabelName, Vec<usize>>> = IndexMap::new();
        for index in 0..self.len() {
            let Some(target2) = self.target2[index] else {
                continue;
            };
            let name1 = self.target1_names[self.target1[index]].clone();
            let name2 = self.target2_names[target2].clone();
            mapping
                .entry(name1)
                .or_default()
                .entry(name2)
                .or_default()
                .push(index);
        }
        mapping
    }

    /// Return a dataset with the records permuted by a random order.
    ///
    /// A supplied seed makes the permutation deterministic; without one the
    /// generator is seeded from OS entropy. Name tables are copied unchanged,
    /// their order is independent of record order.
    pub fn shuffle(&self, seed: Option<u64>) -> Dataset {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(&mut rng);
        Dataset {
            files: order.iter().map(|&i| self.files[i].clone()).collect(),
            data: order.iter().map(|&i| self.data[i].clone()).collect(),
            target1: order.iter().map(|&i| self.target1[i]).collect(),
            target2: order.iter().map(|&i| self.target2[i]).collect(),
            target1_names: self.target1_names.clone(),
            target2_names: self.target2_names.clone(),
        }
    }

    /// Record indices grouped by second-level label value, groups in
    /// first-appearance order, indices in dataset order.
    fn group_by_target2(&self) -> IndexMap<Option<LabelIndex>, Vec<usize>> {
        let mut groups: IndexMap<Option<LabelIndex>, Vec<usize>> = IndexMap::new();
        for (index, value) in self.target2.iter().enumerate() {
            groups.entry(*value).or_default().push(index);
        }
        groups
    }
}

/// Dense renumbering of the label indices still referenced after a removal.
struct LabelRemap {
    mapping: HashMap<LabelIndex, LabelIndex>,
    names: Vec<LabelName>,
}

impl LabelRemap {
    /// Build the renumbering for the indices yielded by `referenced`.
    ///
    /// Surviving indices keep their ascending order, so when nothing is orphaned
    /// the renumbering is the identity.
    fn over(referenced: impl Iterator<Item = LabelIndex>, names: &[LabelName]) -> Self {
        let surviving: BTreeSet<LabelIndex> = referenced.collect();
        let mapping = surviving
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new))
            .collect();
        let names = surviving.iter().map(|&old| names[old].clone()).collect();
        Self { mapping, names }
    }

    fn renumber(&self, index: LabelIndex) -> LabelIndex {
        self.mapping[&index]
    }
}
