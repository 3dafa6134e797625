use super::bounds::BoundingBox;
use super::chain::FrontChain;
use super::geometry::{distance_to_origin, overlaps, tangent_place, Point, OVERLAP_EPSILON};
use crate::circles::arena::{CircleId, CircleStore};

/// Configuration for the placement engine.
#[derive(Debug, Clone, Copy)]
pub struct PackConfig {
    /// Squared-gap margin above which two circles count as overlapping
    pub overlap_epsilon: f64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            overlap_epsilon: OVERLAP_EPSILON,
        }
    }
}

/// Whether the next attempt needs a fresh nearest-to-origin anchor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorState {
    /// A new circle: rescan the chain for the member nearest the origin.
    NeedsAnchorSearch,
    /// A splice just happened: retry the same circle on the current anchors.
    RetryWithKnownAnchors,
}

/// Counters collected while packing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackStats {
    pub placed: usize,
    pub anchor_searches: usize,
    pub forward_splices: usize,
    pub backward_splices: usize,
    /// Circles dropped from the chain by splices
    pub excised: usize,
}

impl PackStats {
    pub fn splices(&self) -> usize {
        self.forward_splices + self.backward_splices
    }
}

/// The finished layout: positions live in the store, this holds the rest.
#[derive(Debug, Clone)]
pub struct Packing {
    pub bounds: BoundingBox,
    pub chain: FrontChain,
    /// Final anchor `a`; the start of a walk around the chain (None without a chain)
    pub anchor: Option<CircleId>,
    pub stats: PackStats,
}

impl Packing {
    /// Translate all circles and the box so the box is centered on the origin.
    /// Returns the offset that was applied.
    pub fn recenter(&mut self, store: &mut CircleStore) -> Point {
        if self.bounds.is_empty() {
            return Point::new(0.0, 0.0);
        }
        let center = self.bounds.center();
        store.translate(-center.x, -center.y);
        self.bounds.translate(-center.x, -center.y);
        Point::new(-center.x, -center.y)
    }
}

/// What the overlap scans decided for a candidate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Accept,
    /// Forward-found intersecting member `j`: splice so a → j.
    SpliceForward(CircleId),
    /// Backward-found intersecting member `k`: splice so k → b.
    SpliceBackward(CircleId),
}

/// Incremental placement engine.
///
/// Owns the front chain, the bounding box and the statistics; borrows the
/// store to write positions. `new` places the first three circles, each
/// `step` places one more.
pub struct Packer<'s> {
    store: &'s mut CircleStore,
    config: PackConfig,
    chain: FrontChain,
    bounds: BoundingBox,
    stats: PackStats,
    /// Current anchor pair (a, b), with b == chain.next(a) between steps
    anchors: Option<(CircleId, CircleId)>,
    state: AnchorState,
    /// Next circle in insertion order to place
    cursor: usize,
}

impl<'s> Packer<'s> {
    pub fn new(store: &'s mut CircleStore, config: PackConfig) -> Self {
        let mut packer = Self {
            chain: FrontChain::with_capacity(store.len()),
            store,
            config,
            bounds: BoundingBox::new(),
            stats: PackStats::default(),
            anchors: None,
            state: AnchorState::NeedsAnchorSearch,
            cursor: 0,
        };
        packer.bootstrap();
        packer
    }

    pub fn store(&self) -> &CircleStore {
        &*self.store
    }

    pub fn chain(&self) -> &FrontChain {
        &self.chain
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn stats(&self) -> &PackStats {
        &self.stats
    }

    pub fn anchors(&self) -> Option<(CircleId, CircleId)> {
        self.anchors
    }

    /// Number of circles still waiting for a position.
    pub fn remaining(&self) -> usize {
        self.store.len() - self.cursor
    }

    /// Place circles 1–3: two side by side on the x axis, the third tangent
    /// to both. With all three present, link the chain 1 → 3 → 2 → 1.
    fn bootstrap(&mut self) {
        let n = self.store.len();
        if n == 0 {
            return;
        }

        let first = CircleId(0);
        let c = self.store.get_mut(first);
        c.x = -c.radius;
        c.y = 0.0;
        self.commit(first);
        if n == 1 {
            return;
        }

        let second = CircleId(1);
        let c = self.store.get_mut(second);
        c.x = c.radius;
        c.y = 0.0;
        self.commit(second);
        if n == 2 {
            return;
        }

        let third = CircleId(2);
        self.place_tangent(first, second, third);
        self.commit(third);

        self.chain.form_cycle(&[first, third, second]);
        self.anchors = Some((first, third));
        tracing::debug!("Initial chain: #0 -> #2 -> #1");
    }

    fn commit(&mut self, id: CircleId) {
        self.bounds.update(self.store.get(id));
        self.stats.placed += 1;
        self.cursor += 1;
    }

    fn place_tangent(&mut self, a: CircleId, b: CircleId, c: CircleId) {
        let radius = self.store.get(c).radius;
        let p = tangent_place(self.store.get(a), self.store.get(b), radius);
        let circle = self.store.get_mut(c);
        circle.x = p.x;
        circle.y = p.y;
    }

    fn overlaps_with(&self, j: CircleId, c: CircleId) -> bool {
        overlaps(
            self.store.get(j),
            self.store.get(c),
            self.config.overlap_epsilon,
        )
    }

    /// The chain member nearest the origin, scanning one lap from `start`.
    /// Ties keep the first member met.
    fn nearest_to_origin(&self, start: CircleId) -> CircleId {
        let mut nearest = start;
        let mut nearest_dist = f64::INFINITY;
        for id in self.chain.iter_from(start) {
            let dist = distance_to_origin(self.store.get(id));
            if dist < nearest_dist {
                nearest_dist = dist;
                nearest = id;
            }
        }
        nearest
    }

    /// Forward scan from b.next up to b, then (on a hit) backward scan from
    /// a.prev up to j.prev. The backward hit wins only with strictly fewer hops.
    fn resolve(&self, a: CircleId, b: CircleId, c: CircleId) -> Resolution {
        let mut s1 = 0usize;
        let mut j = self.chain.next(b);
        let mut hit = None;
        while j != b {
            if self.overlaps_with(j, c) {
                tracing::debug!("Circle #{} intersects #{}", c.0, j.0);
                hit = Some(j);
                break;
            }
            j = self.chain.next(j);
            s1 += 1;
        }
        let Some(j) = hit else {
            return Resolution::Accept;
        };

        let stop = self.chain.prev(j);
        let mut s2 = 0usize;
        let mut k = self.chain.prev(a);
        while k != stop {
            if self.overlaps_with(k, c) {
                tracing::debug!("Circle #{} intersects #{}", c.0, k.0);
                if s2 < s1 {
                    return Resolution::SpliceBackward(k);
                }
                break;
            }
            k = self.chain.prev(k);
            s2 += 1;
        }
        Resolution::SpliceForward(j)
    }

    /// Place the next circle in insertion order, splicing the chain as needed.
    /// Returns its ID, or None once every circle has a position.
    pub fn step(&mut self) -> Option<CircleId> {
        if self.cursor >= self.store.len() {
            return None;
        }
        let (mut a, mut b) = self.anchors?;
        let c = CircleId(self.cursor as u32);
        tracing::debug!("Inserting circle #{}", c.0);

        loop {
            if self.state == AnchorState::NeedsAnchorSearch {
                a = self.nearest_to_origin(a);
                b = self.chain.next(a);
                self.stats.anchor_searches += 1;
                tracing::debug!("Circle #{} is nearest to the origin", a.0);
            }

            tracing::debug!("Trying circle #{} between #{} and #{}", c.0, a.0, b.0);
            self.place_tangent(a, b, c);

            match self.resolve(a, b, c) {
                Resolution::Accept => {
                    self.chain.insert_after(a, c);
                    b = c;
                    self.state = AnchorState::NeedsAnchorSearch;
                    break;
                }
                Resolution::SpliceForward(j) => {
                    tracing::debug!("Forward splicing #{} and #{}", a.0, j.0);
                    self.stats.excised += self.chain.splice(a, j);
                    self.stats.forward_splices += 1;
                    b = j;
                    self.state = AnchorState::RetryWithKnownAnchors;
                }
                Resolution::SpliceBackward(k) => {
                    tracing::debug!("Back splicing #{} and #{}", k.0, b.0);
                    self.stats.excised += self.chain.splice(k, b);
                    self.stats.backward_splices += 1;
                    a = k;
                    self.state = AnchorState::RetryWithKnownAnchors;
                }
            }
        }

        self.anchors = Some((a, b));
        self.commit(c);
        Some(c)
    }

    pub fn finish(self) -> Packing {
        Packing {
            bounds: self.bounds,
            anchor: self.anchors.map(|(a, _)| a),
            chain: self.chain,
            stats: self.stats,
        }
    }
}

/// Place every circle of the store. Positions are written into the store.
pub fn pack_circles(store: &mut CircleStore, config: &PackConfig) -> Packing {
    let mut packer = Packer::new(store, *config);
    while packer.step().is_some() {}
    let packing = packer.finish();

    tracing::info!(
        "Packed {} circles: {} anchor searches, {} forward / {} backward splices, {} left on the chain",
        packing.stats.placed,
        packing.stats.anchor_searches,
        packing.stats.forward_splices,
        packing.stats.backward_splices,
        packing.chain.len()
    );
    packing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::validate::{
        bounds_contains_all, bounds_is_tight, chain_is_cyclic, chain_overlaps,
    };
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn store_of(areas: &[u64]) -> CircleStore {
        let mut store = CircleStore::new();
        for &a in areas {
            store.push(a, None, None);
        }
        store
    }

    /// A store of circles with the given radii (area set to the nearest integer).
    fn store_of_radii(radii: &[f64]) -> CircleStore {
        let mut store = CircleStore::new();
        for &r in radii {
            let id = store.push((PI * r * r).round().max(1.0) as u64, None, None);
            store.get_mut(id).radius = r;
        }
        store
    }

    fn pos(store: &CircleStore, i: u32) -> (f64, f64) {
        let c = store.get(CircleId(i));
        (c.x, c.y)
    }

    #[test]
    fn empty_input_places_nothing() {
        let mut store = CircleStore::new();
        let packing = pack_circles(&mut store, &PackConfig::default());
        assert_eq!(packing.stats.placed, 0);
        assert!(packing.bounds.is_empty());
        assert_eq!(packing.anchor, None);
    }

    #[test]
    fn single_circle_sits_left_of_origin() {
        let mut store = store_of_radii(&[1.5]);
        let packing = pack_circles(&mut store, &PackConfig::default());
        assert_eq!(pos(&store, 0), (-1.5, 0.0));
        assert_eq!(packing.bounds.bottom_left, Point::new(-3.0, -1.5));
        assert_eq!(packing.bounds.top_right, Point::new(0.0, 1.5));
        assert!(packing.chain.is_empty());
        assert_eq!(packing.anchor, None);
    }

    #[test]
    fn two_unit_circles_touch_at_origin() {
        let mut store = store_of_radii(&[1.0, 1.0]);
        let packing = pack_circles(&mut store, &PackConfig::default());
        assert_eq!(pos(&store, 0), (-1.0, 0.0));
        assert_eq!(pos(&store, 1), (1.0, 0.0));
        assert!(packing.chain.is_empty());
        assert_eq!(packing.stats.placed, 2);
    }

    #[test]
    fn bootstrap_radii_follow_area() {
        // Integer areas cannot be exactly π; 3 gives r ≈ 0.977.
        let mut store = store_of(&[3, 3]);
        pack_circles(&mut store, &PackConfig::default());
        let r = (3.0 / PI).sqrt();
        assert_abs_diff_eq!(pos(&store, 0).0, -r, epsilon = 1e-12);
        assert_abs_diff_eq!(pos(&store, 1).0, r, epsilon = 1e-12);
    }

    #[test]
    fn third_circle_forms_equilateral_triangle() {
        let mut store = store_of_radii(&[1.0, 1.0, 1.0]);
        let packing = pack_circles(&mut store, &PackConfig::default());
        let (x, y) = pos(&store, 2);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y, -(3.0f64).sqrt(), epsilon = 1e-6);

        let lap: Vec<u32> = packing.chain.iter_from(CircleId(0)).map(|id| id.0).collect();
        assert_eq!(lap, vec![0, 2, 1]);
        assert_eq!(packing.anchor, Some(CircleId(0)));
    }

    #[test]
    fn fourth_circle_accepted_without_splice() {
        let mut store = store_of_radii(&[1.0, 1.0, 1.0, 1.0]);
        let packing = pack_circles(&mut store, &PackConfig::default());
        assert_eq!(packing.stats.splices(), 0);
        assert_eq!(packing.stats.anchor_searches, 1);
        assert_eq!(packing.chain.len(), 4);
        assert!(chain_overlaps(&store, &packing, OVERLAP_EPSILON).is_empty());
    }

    #[test]
    fn overlapping_fourth_candidate_takes_one_forward_splice() {
        // The small second circle is nearest the origin; the first candidate
        // for circle 4 cuts into circle 3, which is one hop ahead.
        let mut store = store_of(&[1000, 10, 1000, 200]);
        let mut packer = Packer::new(&mut store, PackConfig::default());
        assert_eq!(packer.remaining(), 1);
        let before = *packer.bounds();
        assert_eq!(packer.step(), Some(CircleId(3)));
        assert_eq!(packer.remaining(), 0);
        assert!(packer.bounds().width() >= before.width());
        assert_eq!(packer.step(), None);
        let packing = packer.finish();

        assert_eq!(packing.stats.forward_splices, 1);
        assert_eq!(packing.stats.backward_splices, 0);
        assert_eq!(packing.stats.anchor_searches, 1);
        assert_eq!(packing.stats.excised, 1);
        assert!(!packing.chain.contains(CircleId(0)));

        let lap: Vec<u32> = packing.chain.iter_from(CircleId(1)).map(|id| id.0).collect();
        assert_eq!(lap, vec![1, 3, 2]);
        let (x, y) = pos(&store, 3);
        assert_abs_diff_eq!(x, -7.776437859258135, epsilon = 1e-9);
        assert_abs_diff_eq!(y, -1.9776836323361242, epsilon = 1e-9);
        assert!(chain_overlaps(&store, &packing, OVERLAP_EPSILON).is_empty());
    }

    #[test]
    fn backward_hit_with_fewer_hops_splices_backward() {
        let mut store = store_of(&[1, 2, 2, 1, 200, 1]);
        let mut packer = Packer::new(&mut store, PackConfig::default());
        packer.step();
        packer.step();
        assert_eq!(packer.stats().splices(), 0);

        // Circle 5: forward hit two hops out, backward hit right behind `a`.
        assert_eq!(packer.step(), Some(CircleId(5)));
        assert_eq!(packer.stats().backward_splices, 1);
        assert_eq!(packer.stats().forward_splices, 0);
        assert_eq!(packer.stats().excised, 1);
        assert_eq!(packer.stats().anchor_searches, 3);
        assert_eq!(packer.anchors(), Some((CircleId(1), CircleId(5))));
        assert!(!packer.chain().contains(CircleId(0)));
        let lap: Vec<u32> = packer.chain().iter_from(CircleId(1)).map(|id| id.0).collect();
        assert_eq!(lap, vec![1, 5, 4, 3, 2]);
        assert_eq!(packer.step(), None);
    }

    #[test]
    fn chain_stays_cyclic_and_disjoint_after_every_step() {
        let areas: Vec<u64> = (0..120).map(|i| 1 + (i * 37 % 101) as u64 * 3).collect();
        let mut store = store_of(&areas);
        let n = store.len();
        let mut packer = Packer::new(&mut store, PackConfig::default());
        while let Some(c) = packer.step() {
            let chain = packer.chain();
            assert!(chain.contains(c));
            assert!(chain.is_cycle_from(c, n), "chain broken after placing #{}", c.0);
            let members: Vec<CircleId> = chain.iter_from(c).collect();
            assert_eq!(members.len(), chain.len());
            for (i, &p) in members.iter().enumerate() {
                for &q in &members[i + 1..] {
                    assert!(
                        !overlaps(packer.store().get(p), packer.store().get(q), OVERLAP_EPSILON),
                        "#{} overlaps #{}",
                        p.0,
                        q.0
                    );
                }
            }
        }
        let packing = packer.finish();
        assert_eq!(packing.stats.placed, n);
        assert!(chain_is_cyclic(&packing, n));
    }

    #[test]
    fn every_circle_is_placed_in_order_and_bounded() {
        let areas: Vec<u64> = (1..=60).map(|i| (i * i % 97 + 1) as u64 * 10).collect();
        let mut store = store_of(&areas);
        let packing = pack_circles(&mut store, &PackConfig::default());
        assert_eq!(packing.stats.placed, areas.len());
        assert_eq!(store.len(), areas.len());
        for (i, c) in store.iter().enumerate() {
            assert_eq!(c.id, CircleId(i as u32));
            assert_eq!(c.area, areas[i]);
            assert!(c.x.is_finite() && c.y.is_finite());
        }
        assert!(bounds_contains_all(&store, &packing.bounds));
        assert!(bounds_is_tight(&store, &packing.bounds));
    }

    #[test]
    fn packing_is_deterministic() {
        let areas: Vec<u64> = (1..=80).map(|i| (i * 7919 % 1000 + 1) as u64).collect();
        let mut first = store_of(&areas);
        let mut second = store_of(&areas);
        pack_circles(&mut first, &PackConfig::default());
        pack_circles(&mut second, &PackConfig::default());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn recenter_moves_box_center_to_origin() {
        let mut store = store_of(&[100, 50, 75, 20, 300]);
        let mut packing = pack_circles(&mut store, &PackConfig::default());
        let before = store.get(CircleId(0)).x;
        let offset = packing.recenter(&mut store);
        let center = packing.bounds.center();
        assert_abs_diff_eq!(center.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(center.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(store.get(CircleId(0)).x, before + offset.x, epsilon = 1e-12);
        assert!(bounds_is_tight(&store, &packing.bounds));
    }
}
