/// Diagnostic tool for the input → placement → SVG pipeline
/// Runs each stage without writing output and checks the packing invariants
use packcircles_rs::circles::build_store;
use packcircles_rs::input::read_records;
use packcircles_rs::layout::validate::{
    bounds_contains_all, bounds_is_tight, chain_is_cyclic, chain_overlaps,
};
use packcircles_rs::layout::{PackConfig, Packer};
use packcircles_rs::render::{render_document, SvgConfig};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("packcircles_rs=info".parse()?),
        )
        .init();

    let Some(input) = std::env::args().nth(1).map(PathBuf::from) else {
        anyhow::bail!("usage: debug-pack FILENAME");
    };

    println!("=== DIAGNOSTIC: Input → Placement → SVG ===");
    println!("Input: {}", input.display());

    // === STAGE 1: INPUT ===
    let start = Instant::now();
    let records = read_records(&input)?;
    let mut store = build_store(&records);
    println!(
        "\n[1] Read {} circles in {:.2}ms",
        store.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    if let (Some(min), Some(max)) = (
        store.iter().map(|c| c.area).min(),
        store.iter().map(|c| c.area).max(),
    ) {
        println!("    Areas: {} .. {} (ratio {:.1})", min, max, max as f64 / min as f64);
    }

    // === STAGE 2: PLACEMENT ===
    let n = store.len();
    let config = PackConfig::default();
    let start = Instant::now();
    let mut packer = Packer::new(&mut store, config);
    let mut longest_chain = packer.chain().len();
    let mut broken_at = None;
    while let Some(c) = packer.step() {
        longest_chain = longest_chain.max(packer.chain().len());
        if broken_at.is_none() && !packer.chain().is_cycle_from(c, n) {
            broken_at = Some(c);
        }
    }
    let mut packing = packer.finish();
    let elapsed = start.elapsed();

    let stats = packing.stats;
    println!("\n[2] Placement finished in {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!("    Placed:           {}", stats.placed);
    println!("    Anchor searches:  {}", stats.anchor_searches);
    println!(
        "    Splices:          {} forward, {} backward ({} circles excised)",
        stats.forward_splices, stats.backward_splices, stats.excised
    );
    println!(
        "    Front chain:      {} members at the end, {} at most",
        packing.chain.len(),
        longest_chain
    );
    println!(
        "    Bounding box:     {:.3} x {:.3}",
        packing.bounds.width(),
        packing.bounds.height()
    );

    // === STAGE 3: INVARIANTS ===
    println!("\n[3] Checking invariants:");
    let mut failures = 0;
    let mut check = |ok: bool, what: &str| {
        println!("    {} {}", if ok { "✓" } else { "✗" }, what);
        if !ok {
            failures += 1;
        }
    };
    check(stats.placed == n, "every circle placed");
    check(
        broken_at.is_none() && chain_is_cyclic(&packing, n),
        "front chain stays a single cycle",
    );
    let overlapping = chain_overlaps(&store, &packing, config.overlap_epsilon);
    check(overlapping.is_empty(), "no overlap between chain members");
    check(
        bounds_contains_all(&store, &packing.bounds),
        "bounding box contains every circle",
    );
    check(
        bounds_is_tight(&store, &packing.bounds),
        "bounding box touches a circle on each side",
    );
    check(
        store.iter().all(|c| c.x.is_finite() && c.y.is_finite()),
        "all positions finite",
    );
    if let Some(c) = broken_at {
        println!("      chain first broken after placing #{}", c.0);
    }
    for (p, q) in overlapping.iter().take(5) {
        println!("      #{} overlaps #{}", p.0, q.0);
    }

    // === STAGE 4: SVG ===
    let offset = packing.recenter(&mut store);
    let document = render_document(&store, &packing, &SvgConfig::default());
    let svg_len = document.to_string().len();
    println!(
        "\n[4] Recentered by ({:.3}, {:.3}); SVG is {} bytes",
        offset.x, offset.y, svg_len
    );

    if failures > 0 {
        anyhow::bail!("{} invariant check(s) failed", failures);
    }
    println!("\nAll checks passed.");
    Ok(())
}
