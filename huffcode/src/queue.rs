//! Array-backed binary min-heap keyed on weight
//!
//! Used transiently during tree construction. Items are ordered solely by
//! [`Weighted::weight`]; items with equal weight keep whatever relative order
//! the heap structure gives them.

/// Items that can be ordered in a [`PriorityQueue`]
pub trait Weighted {
    /// The ordering key (lower weights are extracted first)
    fn weight(&self) -> u64;
}

/// Binary min-heap stored in a `Vec`
///
/// For an item at index `i`, its children live at `2i + 1` and `2i + 2` and
/// its parent at `(i - 1) / 2`.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    items: Vec<T>,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        PriorityQueue { items: Vec::new() }
    }

    /// Create an empty queue with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The minimum item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    fn parent(index: usize) -> usize {
        (index - 1) / 2
    }

    fn left(index: usize) -> usize {
        2 * index + 1
    }

    fn right(index: usize) -> usize {
        2 * index + 2
    }
}

impl<T: Weighted> PriorityQueue<T> {
    /// Insert an item, restoring heap order by sifting it up
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the minimum-weight item
    pub fn extract_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }

        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();

        if !self.items.is_empty() {
            self.sift_down(0);
        }

        min
    }

    /// Check that every parent weighs no more than its children
    pub fn is_valid_heap(&self) -> bool {
        (1..self.items.len())
            .all(|i| self.items[Self::parent(i)].weight() <= self.items[i].weight())
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = Self::parent(index);
            if self.items[parent].weight() > self.items[index].weight() {
                self.items.swap(parent, index);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = Self::left(index);
            let right = Self::right(index);
            let mut smallest = index;

            if left < len && self.items[left].weight() < self.items[smallest].weight() {
                smallest = left;
            }
            if right < len && self.items[right].weight() < self.items[smallest].weight() {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Weighted> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Weighted> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = PriorityQueue::new();
        queue.extend(iter);
        queue
    }
}
