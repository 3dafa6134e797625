//! Invariant checks over a finished packing, shared by the tests and the
//! `debug-pack` tool.

use super::bounds::BoundingBox;
use super::geometry::overlaps;
use super::pack::Packing;
use crate::circles::arena::{Circle, CircleId, CircleStore};

/// The chain is a single cycle reachable from the final anchor within
/// `max_hops`, and that lap visits every member.
pub fn chain_is_cyclic(packing: &Packing, max_hops: usize) -> bool {
    match packing.anchor {
        None => packing.chain.is_empty(),
        Some(anchor) => {
            packing.chain.is_cycle_from(anchor, max_hops)
                && packing.chain.iter_from(anchor).count() == packing.chain.len()
        }
    }
}

/// Pairs of chain members overlapping by more than `epsilon`.
pub fn chain_overlaps(
    store: &CircleStore,
    packing: &Packing,
    epsilon: f64,
) -> Vec<(CircleId, CircleId)> {
    let Some(anchor) = packing.anchor else {
        return Vec::new();
    };
    let members: Vec<CircleId> = packing.chain.iter_from(anchor).collect();
    let mut pairs = Vec::new();
    for (i, &p) in members.iter().enumerate() {
        for &q in &members[i + 1..] {
            if overlaps(store.get(p), store.get(q), epsilon) {
                pairs.push((p, q));
            }
        }
    }
    pairs
}

fn tolerance(bounds: &BoundingBox) -> f64 {
    1e-9 * bounds.width().max(bounds.height()).max(1.0)
}

/// Every circle lies inside the box.
pub fn bounds_contains_all(store: &CircleStore, bounds: &BoundingBox) -> bool {
    let tol = tolerance(bounds);
    store.iter().all(|c| {
        bounds.bottom_left.x <= c.x - c.radius + tol
            && bounds.bottom_left.y <= c.y - c.radius + tol
            && bounds.top_right.x >= c.x + c.radius - tol
            && bounds.top_right.y >= c.y + c.radius - tol
    })
}

/// Each side of the box is touched by at least one circle.
pub fn bounds_is_tight(store: &CircleStore, bounds: &BoundingBox) -> bool {
    if store.is_empty() {
        return bounds.is_empty();
    }
    let tol = tolerance(bounds);
    let touches = |edge: f64, side: fn(&Circle) -> f64| {
        store.iter().any(|c| (side(c) - edge).abs() <= tol)
    };
    touches(bounds.bottom_left.x, |c| c.x - c.radius)
        && touches(bounds.bottom_left.y, |c| c.y - c.radius)
        && touches(bounds.top_right.x, |c| c.x + c.radius)
        && touches(bounds.top_right.y, |c| c.y + c.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::pack::{pack_circles, PackConfig};

    #[test]
    fn checks_pass_on_a_fresh_packing() {
        let mut store = CircleStore::new();
        for area in [40, 10, 90, 25, 60, 5, 70] {
            store.push(area, None, None);
        }
        let packing = pack_circles(&mut store, &PackConfig::default());
        assert!(chain_is_cyclic(&packing, store.len()));
        assert!(chain_overlaps(&store, &packing, 1e-3).is_empty());
        assert!(bounds_contains_all(&store, &packing.bounds));
        assert!(bounds_is_tight(&store, &packing.bounds));
    }

    #[test]
    fn loose_box_is_not_tight() {
        let mut store = CircleStore::new();
        store.push(10, None, None);
        let mut packing = pack_circles(&mut store, &PackConfig::default());
        packing.bounds.top_right.x += 1.0;
        assert!(bounds_contains_all(&store, &packing.bounds));
        assert!(!bounds_is_tight(&store, &packing.bounds));
    }

    #[test]
    fn moved_circle_is_reported_as_overlap() {
        let mut store = CircleStore::new();
        for area in [30, 30, 30, 30] {
            store.push(area, None, None);
        }
        let packing = pack_circles(&mut store, &PackConfig::default());
        let (x, y) = (store.get(CircleId(0)).x, store.get(CircleId(0)).y);
        let moved = store.get_mut(CircleId(1));
        moved.x = x;
        moved.y = y;
        assert!(!chain_overlaps(&store, &packing, 1e-3).is_empty());
    }
}
