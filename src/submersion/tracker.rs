use crate::body::BodyHandle;
use crate::utils::hashmap::{Entry, HashMap};
use smallvec::SmallVec;

/// The set of leaves of one body already found under water during the current step.
///
/// Leaves are identified by their [`LeafShape::leaf_index`](crate::shape::LeafShape::leaf_index).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmergedShapes {
    // One bit per leaf. Most bodies have less than 64 leaves.
    words: SmallVec<[u64; 1]>,
}

impl SubmergedShapes {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Was the given leaf already found under water?
    #[inline]
    pub fn contains(&self, leaf_index: usize) -> bool {
        self.words
            .get(leaf_index / 64)
            .is_some_and(|word| word & (1u64 << (leaf_index % 64)) != 0)
    }

    /// Marks a leaf as found under water.
    ///
    /// Returns `false` if it was already marked.
    pub fn insert(&mut self, leaf_index: usize) -> bool {
        let word_id = leaf_index / 64;

        if word_id >= self.words.len() {
            self.words.resize(word_id + 1, 0);
        }

        let mask = 1u64 << (leaf_index % 64);
        let inserted = self.words[word_id] & mask == 0;
        self.words[word_id] |= mask;
        inserted
    }

    /// Unmarks every leaf, keeping the allocated storage.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|word| *word = 0);
    }

    /// The number of marked leaves.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Is no leaf marked?
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }
}

/// Remembers, for each body, which of its leaves already contributed to buoyancy this step.
///
/// Each body handle gets a dense index the first time it is seen; that index
/// stays valid for the lifetime of the tracker. [`SubmersionTracker::reset`]
/// must be called once per step before any body is processed.
///
/// The tracker isn't synchronized. Concurrent passes take each body's
/// [`SubmergedShapes`] out with [`SubmersionTracker::take_shapes`] and give it
/// back with [`SubmersionTracker::restore_shapes`].
#[derive(Clone, Debug, Default)]
pub struct SubmersionTracker {
    indices: HashMap<BodyHandle, usize>,
    handles: Vec<BodyHandle>,
    slots: Vec<SubmergedShapes>,
}

impl SubmersionTracker {
    /// An empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unmarks every leaf of every body, without freeing anything.
    pub fn reset(&mut self) {
        log::debug!("Resetting the submersion state of {} bodies.", self.slots.len());
        self.slots.iter_mut().for_each(SubmergedShapes::clear);
    }

    /// The number of bodies this tracker has seen.
    pub fn num_bodies(&self) -> usize {
        self.handles.len()
    }

    /// The handles of the bodies this tracker has seen, in dense-index order.
    pub fn handles(&self) -> &[BodyHandle] {
        &self.handles
    }

    /// The dense index of `handle`, if this tracker has seen it.
    pub fn dense_index(&self, handle: BodyHandle) -> Option<usize> {
        self.indices.get(&handle).copied()
    }

    fn dense_index_or_insert(&mut self, handle: BodyHandle) -> usize {
        match self.indices.entry(handle) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = self.handles.len();
                self.handles.push(handle);
                self.slots.push(SubmergedShapes::new());
                *entry.insert(index)
            }
        }
    }

    /// Was the given leaf of the given body already found under water this step?
    pub fn is_submerged(&self, handle: BodyHandle, leaf_index: usize) -> bool {
        self.shapes(handle)
            .is_some_and(|shapes| shapes.contains(leaf_index))
    }

    /// Marks a leaf of a body as found under water.
    ///
    /// Returns `false` if it was already marked.
    pub fn mark_submerged(&mut self, handle: BodyHandle, leaf_index: usize) -> bool {
        self.shapes_mut(handle).insert(leaf_index)
    }

    /// The submerged leaves of a body, if this tracker has seen it.
    pub fn shapes(&self, handle: BodyHandle) -> Option<&SubmergedShapes> {
        self.dense_index(handle).map(|i| &self.slots[i])
    }

    /// The submerged leaves of a body, registering the body if needed.
    pub fn shapes_mut(&mut self, handle: BodyHandle) -> &mut SubmergedShapes {
        let index = self.dense_index_or_insert(handle);
        &mut self.slots[index]
    }

    /// Moves the submerged leaves of a body out of this tracker.
    ///
    /// The body keeps its dense index; its slot is empty until
    /// [`SubmersionTracker::restore_shapes`] is called.
    pub fn take_shapes(&mut self, handle: BodyHandle) -> SubmergedShapes {
        core::mem::take(self.shapes_mut(handle))
    }

    /// Puts back the submerged leaves of a body taken by [`SubmersionTracker::take_shapes`].
    pub fn restore_shapes(&mut self, handle: BodyHandle, shapes: SubmergedShapes) {
        *self.shapes_mut(handle) = shapes;
    }
}
