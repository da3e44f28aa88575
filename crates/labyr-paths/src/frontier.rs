//! Open and closed sets for best-first search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// `f` first and, among equal `f`, the cell that entered the open set first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    f: i32,
    seq: u64,
    idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Tracks which grid cells are pending (open) and which are finalized
/// (closed) during one search.
///
/// Selection picks the open cell with the lowest priority; ties go to the
/// cell discovered earliest. A cell keeps its discovery sequence number
/// when its priority changes, so re-prioritizing never moves it behind
/// cells that were discovered later. Superseded heap entries are dropped
/// lazily by [`peek_min`](Self::peek_min).
#[derive(Debug, Clone)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    open: Vec<bool>,
    closed: Vec<bool>,
    key: Vec<i32>,
    seq: Vec<u64>,
    next_seq: u64,
    open_len: usize,
    closed_order: Vec<usize>,
}

impl Frontier {
    /// Create empty sets for a grid of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            open: vec![false; len],
            closed: vec![false; len],
            key: vec![0; len],
            seq: vec![0; len],
            next_seq: 0,
            open_len: 0,
            closed_order: Vec::new(),
        }
    }

    #[inline]
    pub fn is_open(&self, idx: usize) -> bool {
        self.open[idx]
    }

    #[inline]
    pub fn is_closed(&self, idx: usize) -> bool {
        self.closed[idx]
    }

    /// Add a newly discovered cell with priority `f`. Does nothing if the
    /// cell is already open.
    pub fn add_open(&mut self, idx: usize, f: i32) {
        if self.open[idx] {
            return;
        }
        debug_assert!(!self.closed[idx], "closed cells never reopen");
        self.open[idx] = true;
        self.open_len += 1;
        self.seq[idx] = self.next_seq;
        self.next_seq += 1;
        self.key[idx] = f;
        self.heap.push(Entry {
            f,
            seq: self.seq[idx],
            idx,
        });
    }

    /// Change the priority of an open cell.
    pub fn update(&mut self, idx: usize, f: i32) {
        if !self.open[idx] || self.key[idx] == f {
            return;
        }
        self.key[idx] = f;
        self.heap.push(Entry {
            f,
            seq: self.seq[idx],
            idx,
        });
    }

    pub fn remove_open(&mut self, idx: usize) {
        if self.open[idx] {
            self.open[idx] = false;
            self.open_len -= 1;
        }
    }

    pub fn add_closed(&mut self, idx: usize) {
        if !self.closed[idx] {
            self.closed[idx] = true;
            self.closed_order.push(idx);
        }
    }

    /// The open cell with the lowest priority, earliest discovery first.
    /// The cell stays open.
    pub fn peek_min(&mut self) -> Option<usize> {
        while let Some(top) = self.heap.peek() {
            if self.open[top.idx] && self.key[top.idx] == top.f {
                return Some(top.idx);
            }
            // Stale: already expanded, or re-prioritized since.
            self.heap.pop();
        }
        None
    }

    /// Whether no cell is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open_len == 0
    }

    /// Closed cells in the order they were closed.
    pub fn closed_order(&self) -> &[usize] {
        &self.closed_order
    }
}
