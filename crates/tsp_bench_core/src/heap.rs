//! Array-backed binary heaps specialized for the solvers: an indexed
//! min-heap driving Prim's algorithm and a fixed-capacity max-heap
//! that keeps the k smallest candidates during neighbor search.

/// Key types the heaps order by. `UNREACHABLE` is the caller-visible
/// "no finite key yet" marker used when seeding Prim.
pub trait HeapKey: Copy + PartialOrd {
    const UNREACHABLE: Self;

    fn is_unreachable(self) -> bool;
}

impl HeapKey for f64 {
    const UNREACHABLE: Self = f64::INFINITY;

    fn is_unreachable(self) -> bool {
        self.is_infinite()
    }
}

impl HeapKey for i64 {
    const UNREACHABLE: Self = i64::MAX;

    fn is_unreachable(self) -> bool {
        self == i64::MAX
    }
}

/// A keyed node id queued in either heap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeapEntry<K> {
    pub key: K,
    pub id: usize,
}

impl<K> HeapEntry<K> {
    pub fn new(key: K, id: usize) -> Self {
        Self { key, id }
    }
}

/// Binary min-heap over `HeapEntry` values, children of slot `i` at
/// `2i + 1` and `2i + 2`.
#[derive(Clone, Debug)]
pub struct MinHeap<K> {
    entries: Vec<HeapEntry<K>>,
}

impl<K: HeapKey> MinHeap<K> {
    /// Heapifies an unordered batch in O(n) by sifting down every
    /// internal slot, last first.
    pub fn from_entries(entries: Vec<HeapEntry<K>>) -> Self {
        let mut heap = Self { entries };
        for slot in (0..heap.entries.len() / 2).rev() {
            heap.sift_down(slot);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns the minimum entry, `None` once drained.
    pub fn extract_min(&mut self) -> Option<HeapEntry<K>> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        self.sift_down(0);
        min
    }

    /// Lowers the key of `id` and restores heap order. A no-op when
    /// `id` is not queued or `key` is not strictly smaller; the lookup
    /// is a linear scan, which beats position bookkeeping at the queue
    /// sizes the solvers run.
    pub fn decrease_key(&mut self, id: usize, key: K) {
        let Some(mut slot) = self.entries.iter().position(|entry| entry.id == id) else {
            return;
        };
        if !(key < self.entries[slot].key) {
            return;
        }
        self.entries[slot].key = key;
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !(self.entries[slot].key < self.entries[parent].key) {
                break;
            }
            self.entries.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut smallest = slot;
            if left < len && self.entries[left].key < self.entries[smallest].key {
                smallest = left;
            }
            if right < len && self.entries[right].key < self.entries[smallest].key {
                smallest = right;
            }
            if smallest == slot {
                return;
            }
            self.entries.swap(slot, smallest);
            slot = smallest;
        }
    }
}

/// Max-heap capped at `capacity` entries that retains the smallest
/// keys ever offered: below capacity everything is admitted, at
/// capacity a smaller key replaces the current maximum at the root.
#[derive(Clone, Debug)]
pub struct BoundedMaxHeap {
    capacity: usize,
    entries: Vec<HeapEntry<f64>>,
}

impl BoundedMaxHeap {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Largest retained key, `None` while empty. This is the pruning
    /// radius during neighbor search.
    pub fn max_key(&self) -> Option<f64> {
        self.entries.first().map(|entry| entry.key)
    }

    pub fn insert(&mut self, entry: HeapEntry<f64>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() < self.capacity {
            self.entries.push(entry);
            let mut slot = self.entries.len() - 1;
            while slot > 0 {
                let parent = (slot - 1) / 2;
                if !(self.entries[parent].key < self.entries[slot].key) {
                    break;
                }
                self.entries.swap(slot, parent);
                slot = parent;
            }
        } else if entry.key < self.entries[0].key {
            self.entries[0] = entry;
            self.sift_down(0);
        }
    }

    pub fn into_entries(self) -> Vec<HeapEntry<f64>> {
        self.entries
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut largest = slot;
            if left < len && self.entries[left].key > self.entries[largest].key {
                largest = left;
            }
            if right < len && self.entries[right].key > self.entries[largest].key {
                largest = right;
            }
            if largest == slot {
                return;
            }
            self.entries.swap(slot, largest);
            slot = largest;
        }
    }
}
