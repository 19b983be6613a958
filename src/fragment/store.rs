use super::{Domain, Fragment, FragmentId, Selection};

/// Insertion-ordered collection of every fragment, visible or not.
#[derive(Debug, Default)]
pub struct FragmentStore {
    fragments: Vec<Fragment>,
    next_id: u64,
}

impl FragmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            fragments: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a fresh empty fragment and return its id.
    pub fn spawn(&mut self) -> FragmentId {
        let id = FragmentId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.fragments.push(Fragment::empty(id));
        id
    }

    /// Drop every fragment. Ids keep increasing across clears.
    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Number of fragments, including empty ones.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the store holds no fragment at all.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Look up a fragment.
    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.id == id)
    }

    /// Look up a fragment for mutation.
    pub fn get_mut(&mut self, id: FragmentId) -> Option<&mut Fragment> {
        self.fragments.iter_mut().find(|f| f.id == id)
    }

    /// Whether `id` is still present.
    pub fn contains(&self, id: FragmentId) -> bool {
        self.get(id).is_some()
    }

    /// Fragments in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    /// Most recently created fragment.
    pub fn last(&self) -> Option<&Fragment> {
        self.fragments.last()
    }

    /// Number of fragments without a selection.
    pub fn empty_count(&self) -> usize {
        self.fragments.iter().filter(|f| f.is_empty()).count()
    }

    /// Visible fragments sorted left to right by selection start.
    pub fn visible(&self) -> Vec<&Fragment> {
        let mut visible: Vec<&Fragment> = self.fragments.iter().filter(|f| f.is_visible()).collect();
        visible.sort_by(|a, b| {
            let a = a.selection.map_or(0.0, |s| s.lo);
            let b = b.selection.map_or(0.0, |s| s.lo);
            a.total_cmp(&b)
        });
        visible
    }

    /// Selections of every other fragment that has one.
    pub fn other_selections(&self, id: FragmentId) -> Vec<Selection> {
        self.fragments
            .iter()
            .filter(|f| f.id != id)
            .filter_map(|f| f.selection)
            .collect()
    }

    /// Domains of every other fragment that has one.
    pub fn other_domains(&self, id: FragmentId) -> Vec<Domain> {
        self.fragments
            .iter()
            .filter(|f| f.id != id && f.selection.is_some())
            .filter_map(|f| f.domain)
            .collect()
    }

    /// Remove fragments whose selection collapsed to zero width, returning
    /// their ids in creation order.
    pub fn remove_collapsed(&mut self) -> Vec<FragmentId> {
        let removed: Vec<FragmentId> = self
            .fragments
            .iter()
            .filter(|f| f.is_collapsed())
            .map(|f| f.id)
            .collect();
        self.fragments.retain(|f| !f.is_collapsed());
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::LinearScale;

    fn master() -> LinearScale {
        LinearScale::new((0.0, 100.0), (0.0, 100.0)).expect("valid scale")
    }

    #[test]
    fn spawn_assigns_increasing_ids() {
        let mut store = FragmentStore::new();
        let a = store.spawn();
        let b = store.spawn();
        assert!(b > a);
        assert_eq!(store.len(), 2);
        assert_eq!(store.last().map(|f| f.id()), Some(b));

        store.clear();
        let c = store.spawn();
        assert!(c > b, "ids are never reused");
    }

    #[test]
    fn visible_is_sorted_by_selection_start() {
        let mut store = FragmentStore::new();
        let right = store.spawn();
        let left = store.spawn();
        store.spawn();
        store.get_mut(right).expect("present").set_selection(Selection::new(60.0, 90.0), &master());
        store.get_mut(left).expect("present").set_selection(Selection::new(10.0, 30.0), &master());

        let order: Vec<FragmentId> = store.visible().iter().map(|f| f.id()).collect();
        assert_eq!(order, vec![left, right]);
        assert_eq!(store.empty_count(), 1);
    }

    #[test]
    fn remove_collapsed_keeps_empty_fragments() {
        let mut store = FragmentStore::new();
        let collapsed = store.spawn();
        let empty = store.spawn();
        store
            .get_mut(collapsed)
            .expect("present")
            .set_selection(Selection::new(10.0, 10.0), &master());

        assert_eq!(store.remove_collapsed(), vec![collapsed]);
        assert_eq!(store.len(), 1);
        assert!(store.contains(empty));
    }

    #[test]
    fn other_selections_skip_self_and_empty() {
        let mut store = FragmentStore::new();
        let a = store.spawn();
        let b = store.spawn();
        store.spawn();
        store.get_mut(a).expect("present").set_selection(Selection::new(0.0, 20.0), &master());
        store.get_mut(b).expect("present").set_selection(Selection::new(30.0, 50.0), &master());

        assert_eq!(store.other_selections(a), vec![Selection::new(30.0, 50.0)]);
        assert_eq!(store.other_domains(b), vec![Domain::new(0.0, 20.0)]);
    }
}
