use crate::circles::arena::CircleId;

/// The front chain: a circular doubly linked list over the circles that form
/// the current outer boundary of the packing.
///
/// Links are stored as indices parallel to the circle store. A circle whose
/// `next` is `CircleId::NONE` is not a member. Excised circles keep their
/// positions in the store; they just become unreachable from the chain.
#[derive(Debug, Clone)]
pub struct FrontChain {
    next: Vec<CircleId>,
    prev: Vec<CircleId>,
    members: usize,
}

impl FrontChain {
    /// An empty chain able to link circles `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next: vec![CircleId::NONE; capacity],
            prev: vec![CircleId::NONE; capacity],
            members: 0,
        }
    }

    /// Link `ids` into a single cycle in the given `next` order.
    /// Any previous membership is dropped.
    pub fn form_cycle(&mut self, ids: &[CircleId]) {
        self.next.fill(CircleId::NONE);
        self.prev.fill(CircleId::NONE);
        self.members = ids.len();
        for (i, &id) in ids.iter().enumerate() {
            let next = ids[(i + 1) % ids.len()];
            self.next[id.index()] = next;
            self.prev[next.index()] = id;
        }
    }

    /// Insert `b` (not yet a member) immediately after `a`.
    pub fn insert_after(&mut self, a: CircleId, b: CircleId) {
        debug_assert!(self.contains(a) && !self.contains(b));
        let c = self.next[a.index()];
        self.next[a.index()] = b;
        self.prev[b.index()] = a;
        self.next[b.index()] = c;
        self.prev[c.index()] = b;
        self.members += 1;
    }

    /// Make `b` the direct successor of `a`, excising every member strictly
    /// between them (walking forward from `a`). Returns how many were excised.
    pub fn splice(&mut self, a: CircleId, b: CircleId) -> usize {
        let mut removed = 0;
        let mut n = self.next[a.index()];
        while n != b && n != a {
            let following = self.next[n.index()];
            self.next[n.index()] = CircleId::NONE;
            self.prev[n.index()] = CircleId::NONE;
            removed += 1;
            n = following;
        }
        self.next[a.index()] = b;
        self.prev[b.index()] = a;
        self.members -= removed;
        removed
    }

    pub fn next(&self, id: CircleId) -> CircleId {
        self.next[id.index()]
    }

    pub fn prev(&self, id: CircleId) -> CircleId {
        self.prev[id.index()]
    }

    pub fn contains(&self, id: CircleId) -> bool {
        self.next
            .get(id.index())
            .is_some_and(|&n| n != CircleId::NONE)
    }

    /// Number of circles currently linked.
    pub fn len(&self) -> usize {
        self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members == 0
    }

    /// Walk `next` links once around the cycle, starting at `start`.
    pub fn iter_from(&self, start: CircleId) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            start,
            current: self.contains(start).then_some(start),
        }
    }

    /// Whether walking `next` from `start` returns to `start` within `max_hops`.
    pub fn is_cycle_from(&self, start: CircleId, max_hops: usize) -> bool {
        if !self.contains(start) {
            return false;
        }
        let mut n = start;
        for _ in 0..max_hops {
            let next = self.next[n.index()];
            if next == CircleId::NONE || self.prev[next.index()] != n {
                return false;
            }
            n = next;
            if n == start {
                return true;
            }
        }
        false
    }
}

/// Iterator over one lap of the chain.
pub struct ChainIter<'a> {
    chain: &'a FrontChain,
    start: CircleId,
    current: Option<CircleId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = CircleId;

    fn next(&mut self) -> Option<CircleId> {
        let id = self.current?;
        let next = self.chain.next(id);
        self.current = (next != self.start && next != CircleId::NONE).then_some(next);
        Some(id)
    }
}
