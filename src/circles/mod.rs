pub mod arena;

use self::arena::CircleStore;
use crate::input::types::CircleRecord;

/// Build a CircleStore from parsed input records, preserving their order.
pub fn build_store(records: &[CircleRecord]) -> CircleStore {
    let mut store = CircleStore::with_capacity(records.len());
    for record in records {
        store.push(record.area, record.color.clone(), record.name.clone());
    }

    let colored = store.iter().filter(|c| c.color.is_some()).count();
    let named = store.iter().filter(|c| c.name.is_some()).count();
    let total_area = store
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.area));
    tracing::info!(
        "Built store: {} circles ({} colored, {} named), total area {}",
        store.len(),
        colored,
        named,
        total_area
    );

    if let Some(largest) = store.iter().max_by_key(|c| c.area) {
        tracing::debug!(
            "Largest circle: #{} area={} r={:.3}",
            largest.id.0,
            largest.area,
            largest.radius
        );
    }

    store
}
