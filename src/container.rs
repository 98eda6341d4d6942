use crate::{element::Element, error::Error, vertical::ComponentStore};

/// Storage for all elements of one kind, plus their optional and custom
/// component columns.
///
/// Rows are appended at the tail and never move until compaction. Deleting a
/// row only sets its tombstone bit; the slot keeps its storage and its index
/// until [`compact`](ElementContainer::compact) physically removes the gaps.
/// The container distinguishes the *live count* ([`len`](Self::len)) from the
/// *slot count* ([`slot_count`](Self::slot_count), which includes
/// tombstones); the two are equal exactly when the container is compact.
///
/// Every mutation of the row storage is fanned out to the component store so
/// enabled columns always hold one value per slot.
pub(crate) struct ElementContainer<E, C> {
    elements: Vec<E>,
    live: usize,
    pub(crate) components: C,
}

impl<E, C> ElementContainer<E, C>
where
    E: Element,
    C: ComponentStore,
{
    pub fn new() -> Self {
        ElementContainer {
            elements: Vec::new(),
            live: 0,
            components: C::default(),
        }
    }

    /// Number of live (not tombstoned) elements.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Number of storage slots, tombstones included. Element indices range
    /// over `0..slot_count()`.
    pub fn slot_count(&self) -> usize {
        self.elements.len()
    }

    pub fn num_deleted(&self) -> usize {
        self.slot_count() - self.live
    }

    pub fn is_compact(&self) -> bool {
        self.live == self.elements.len()
    }

    pub fn require_compactness(&self, what: &'static str) -> Result<(), Error> {
        if self.is_compact() {
            Ok(())
        } else {
            Err(Error::MissingCompactness(what))
        }
    }

    pub fn get(&self, i: u32) -> &E {
        &self.elements[i as usize]
    }

    pub fn get_mut(&mut self, i: u32) -> &mut E {
        &mut self.elements[i as usize]
    }

    /// Append one blank element and return its index.
    pub fn push(&mut self) -> u32 {
        let i = self.elements.len() as u32;
        self.elements.push(E::default());
        self.components.push(1);
        self.live += 1;
        i
    }

    /// Append `n` blank elements and return the index of the first.
    pub fn push_many(&mut self, n: usize) -> u32 {
        let first = self.elements.len() as u32;
        self.elements
            .extend(std::iter::repeat_with(E::default).take(n));
        self.components.push(n);
        self.live += n;
        first
    }

    pub fn reserve(&mut self, n: usize) {
        self.elements.reserve(n);
        self.components.reserve(n);
    }

    /// Grow or shrink the slot count to `n`.
    ///
    /// Growing appends blank elements. Shrinking only tombstones the
    /// trailing slots; their storage, and the column storage, stays until
    /// compaction.
    pub fn resize(&mut self, n: usize) {
        if n >= self.elements.len() {
            self.push_many(n - self.elements.len());
        } else {
            for e in &mut self.elements[n..] {
                let status = e.status_mut();
                if !status.deleted() {
                    status.set_deleted(true);
                    self.live -= 1;
                }
            }
        }
    }

    /// Tombstone the element at `i`. Deleting a tombstone is a no-op.
    ///
    /// References held by other elements are not touched; they dangle at the
    /// tombstone until the next compaction nulls or remaps them.
    pub fn delete(&mut self, i: u32) {
        let status = self.elements[i as usize].status_mut();
        if !status.deleted() {
            status.set_deleted(true);
            self.live -= 1;
        }
    }

    /// The old-index-to-new-index map compaction would apply right now.
    /// Tombstoned slots map to `None`; for a compact container this is the
    /// identity map.
    pub fn compact_map(&self) -> Vec<Option<u32>> {
        let mut next = 0u32;
        self.elements
            .iter()
            .map(|e| {
                if e.status().deleted() {
                    None
                } else {
                    let i = next;
                    next += 1;
                    Some(i)
                }
            })
            .collect()
    }

    /// Remove tombstones, shifting live elements down to close the gaps and
    /// compacting every column in lockstep.
    ///
    /// Returns the applied old-to-new index map so the caller can rewrite
    /// handles held by other containers, or `None` if the container was
    /// already compact and nothing moved.
    pub fn compact(&mut self) -> Option<Vec<Option<u32>>> {
        if self.is_compact() {
            return None;
        }
        let map = self.compact_map();
        self.elements.retain(|e| !e.status().deleted());
        self.components.compact(&map);
        Some(map)
    }

    /// Drop all elements. Columns are emptied but keep their enabled state.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.live = 0;
        self.components.clear();
    }

    /// Replace this container's content with a copy of `other`: rows,
    /// enabled optional columns and custom columns.
    ///
    /// Columns enabled here but not in `other` stay enabled and are refilled
    /// with default values; that is the best-effort part of a cross-mesh
    /// import, where components only one side owns are silently skipped.
    pub fn import_from(&mut self, other: &Self)
    where
        E: Clone,
    {
        self.elements = other.elements.clone();
        self.live = other.live;
        // Empty all columns first, then let the import overwrite the ones
        // `other` has; the final resize refills the skipped ones with
        // defaults at the new length.
        self.components.clear();
        self.components.import_from(&other.components);
        self.components.resize(self.elements.len());
    }

    /// Indices of live elements, in storage order.
    pub fn live_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.status().deleted())
            .map(|(i, _)| i as u32)
    }
}

#[cfg(test)]
mod test {
    use super::ElementContainer;
    use crate::{
        element::{Element, Vertex},
        vertical::VertexComponents,
    };

    fn container_with(n: usize) -> ElementContainer<Vertex, VertexComponents> {
        let mut container = ElementContainer::new();
        container.push_many(n);
        container
    }

    #[test]
    fn t_push_and_delete_counts() {
        let mut container = container_with(5);
        assert_eq!(container.len(), 5);
        assert_eq!(container.slot_count(), 5);
        assert!(container.is_compact());
        container.delete(2);
        assert_eq!(container.len(), 4);
        assert_eq!(container.slot_count(), 5);
        assert_eq!(container.num_deleted(), 1);
        assert!(!container.is_compact());
        assert!(container.get(2).status().deleted());
        // Deleting a tombstone changes nothing.
        container.delete(2);
        assert_eq!(container.len(), 4);
    }

    #[test]
    fn t_compact_map_identity_when_compact() {
        let container = container_with(3);
        assert_eq!(container.compact_map(), [Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn t_compact_on_compact_container_is_noop() {
        let mut container = container_with(3);
        assert!(container.compact().is_none());
        assert_eq!(container.len(), 3);
    }

    #[test]
    fn t_compact_removes_tombstones() {
        let mut container = container_with(5);
        for (i, idx) in container.live_indices().enumerate() {
            assert_eq!(i as u32, idx);
        }
        container.get_mut(3).position = glam::vec3(3.0, 0.0, 0.0);
        container.get_mut(4).position = glam::vec3(4.0, 0.0, 0.0);
        container.delete(1);
        container.delete(3);
        let map = container.compact().expect("Cannot compact container");
        assert_eq!(map, [Some(0), None, Some(1), None, Some(2)]);
        assert_eq!(container.len(), 3);
        assert_eq!(container.slot_count(), 3);
        assert!(container.is_compact());
        // The survivor that was at slot 4 now sits at slot 2.
        assert_eq!(container.get(2).position, glam::vec3(4.0, 0.0, 0.0));
    }

    #[test]
    fn t_compact_moves_columns() {
        let mut container = container_with(4);
        container.components.quality.enable(4);
        for i in 0..4 {
            *container
                .components
                .quality
                .get_mut(i)
                .expect("Cannot write quality") = i as f64;
        }
        container.delete(0);
        container.delete(2);
        container.compact().expect("Cannot compact container");
        assert_eq!(
            container
                .components
                .quality
                .as_slice()
                .expect("Cannot read quality"),
            &[1.0, 3.0]
        );
    }

    #[test]
    fn t_resize_shrink_tombstones() {
        let mut container = container_with(4);
        container.resize(2);
        assert_eq!(container.len(), 2);
        // Slots are not released until compaction.
        assert_eq!(container.slot_count(), 4);
        assert!(container.get(3).status().deleted());
        container.resize(0);
        assert_eq!(container.len(), 0);
        assert_eq!(container.slot_count(), 4);
        container.compact().expect("Cannot compact container");
        assert_eq!(container.slot_count(), 0);
    }

    #[test]
    fn t_resize_grow_extends_columns() {
        let mut container = container_with(2);
        container.components.quality.enable(2);
        container.resize(5);
        assert_eq!(container.len(), 5);
        assert_eq!(
            container
                .components
                .quality
                .as_slice()
                .expect("Cannot read quality")
                .len(),
            5
        );
    }

    #[test]
    fn t_clear_keeps_columns_enabled() {
        let mut container = container_with(3);
        container.components.color.enable(3);
        container.clear();
        assert_eq!(container.len(), 0);
        assert_eq!(container.slot_count(), 0);
        assert!(container.components.color.is_enabled());
        container.push_many(2);
        assert_eq!(
            container
                .components
                .color
                .as_slice()
                .expect("Cannot read colors")
                .len(),
            2
        );
    }
}
