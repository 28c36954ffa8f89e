/// Diagnostic tool to verify tree → layout → tiles pipeline
use anyhow::Context;
use compact_str::CompactString;
use treemap_rs::layout::Rect;
use treemap_rs::tree;

/// Sample tile payload: what a renderer would label and color.
#[derive(Debug, Clone)]
struct Holding {
    symbol: CompactString,
    change: f64,
}

impl Holding {
    fn new(symbol: &str, change: f64) -> Self {
        Self {
            symbol: CompactString::new(symbol),
            change,
        }
    }
}

const SAMPLE: &[(&str, &str, f64, f64)] = &[
    ("Tech", "AAPL", 6.0, 1.2),
    ("Tech", "MSFT", 6.0, -0.4),
    ("Energy", "XOM", 4.0, 0.8),
    ("Tech", "NVDA", 3.0, 3.1),
    ("Health", "JNJ", 2.0, -1.5),
    ("Energy", "CVX", 2.0, 0.0),
    ("Health", "PFE", 1.0, -0.2),
    ("Cash", "USD", 0.0, 0.0),
];

fn parse_dim(arg: Option<String>, default: f64) -> anyhow::Result<f64> {
    match arg {
        Some(s) => {
            let v: f64 = s
                .parse()
                .with_context(|| format!("invalid viewport dimension '{}'", s))?;
            anyhow::ensure!(v >= 0.0, "viewport dimension must be non-negative, got {}", v);
            Ok(v)
        }
        None => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("treemap_rs=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let width = parse_dim(args.next(), 1920.0)?;
    let height = parse_dim(args.next(), 1080.0)?;
    let viewport = Rect::new(0.0, 0.0, width, height);

    println!("=== DIAGNOSTIC: Tree → Layout Pipeline ===");
    println!("Viewport: {:.0}x{:.0}", width, height);

    // Build tree
    let entries = SAMPLE
        .iter()
        .map(|&(group, symbol, weight, change)| (group, weight, Holding::new(symbol, change)));
    let mut model = tree::build_grouped(Holding::new("(no assets)", 0.0), entries, |group| {
        Some(Holding::new(group, 0.0))
    });
    let root = model.root;
    println!("\n[1] Tree built: {} nodes", model.len());

    // Compute layout
    model.layout(root, viewport)?;
    println!("[2] Root weight: {:.2}", model.get(root).weight);

    println!("\n[3] Groups:");
    for &group in model.children(root) {
        let node = model.get(group);
        let name = node.payload.as_ref().map(|h| h.symbol.as_str()).unwrap_or("?");
        if let Some(b) = node.bounds {
            println!(
                "    '{}' weight={:.2} rect: {:.1}x{:.1} at ({:.1}, {:.1})",
                name, node.weight, b.w, b.h, b.x, b.y
            );
        }
    }

    let leaf_groups = model.flattened_leaf_models(root).len();
    println!("\n[4] Leaf groups: {}", leaf_groups);

    println!("\n[5] Tiles:");
    let tile_ids = model.flattened_tree_items(root);
    let tiles: Vec<_> = model.nodes(&tile_ids).collect();
    let mut area_sum = 0.0;
    let mut worst_ratio: f64 = 1.0;
    for tile in &tiles {
        let (Some(holding), Some(b)) = (&tile.payload, tile.bounds) else {
            continue;
        };
        area_sum += b.area();
        if b.area() > 0.0 {
            worst_ratio = worst_ratio.max(b.aspect_ratio());
        }
        println!(
            "    '{}' {:+.1}% - rect: {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1}) - weight: {:.2}",
            holding.symbol,
            holding.change,
            b.w,
            b.h,
            b.area(),
            b.x,
            b.y,
            tile.weight
        );
    }

    // Check for anomalies
    println!("\n[6] Checking for anomalies:");
    println!("    Total tile area: {:.0}px²", area_sum);
    println!("    Viewport area:   {:.0}px²", viewport.area());
    if viewport.area() > 0.0 {
        println!("    Coverage: {:.3}%", area_sum / viewport.area() * 100.0);
    }
    println!("    Worst aspect ratio: {:.3}", worst_ratio);

    let rects: Vec<Rect> = tiles.iter().filter_map(|t| t.bounds).collect();
    let mut overlaps = 0;
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            if a.intersection_area(b) > 1e-6 {
                overlaps += 1;
            }
        }
    }
    println!("    Overlapping tile pairs: {}", overlaps);

    Ok(())
}
