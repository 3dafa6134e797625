use std::io::Write;

use svg::node::element::{Circle as SvgCircle, Definitions, Group, Line, Style, Title};
use svg::node::Text;
use svg::Document;

use crate::circles::arena::CircleStore;
use crate::layout::Packing;

/// Configuration for SVG output.
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Displayed size in px; the drawing is scaled into it
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Margin around the packing = longest box side / this
    pub spacing_divisor: f64,
    /// Outline width in viewport pixels
    pub stroke_px: f64,
    /// Fill for circles without a color of their own
    pub fill: String,
    pub stroke: String,
    /// Draw the final front chain as line segments
    pub debug_chain: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewport_width: 640,
            viewport_height: 480,
            spacing_divisor: 400.0,
            stroke_px: 1.0,
            fill: "#eee".to_string(),
            stroke: "#444".to_string(),
            debug_chain: false,
        }
    }
}

fn fmt5(v: f64) -> String {
    format!("{:.5}", v)
}

/// `Text` nodes are written verbatim, so markup characters in names must be
/// escaped here. `&` goes first.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Build the SVG document for a packing. Expects a recentered packing
/// (bounding box centered on the origin).
pub fn render_document(store: &CircleStore, packing: &Packing, config: &SvgConfig) -> Document {
    let bounds = &packing.bounds;
    let spacing = bounds.width().max(bounds.height()) / config.spacing_divisor;
    let width = bounds.width() + 2.0 * spacing;
    let height = bounds.height() + 2.0 * spacing;
    let stroke_width = config.stroke_px * width / config.viewport_width.max(1) as f64;

    tracing::debug!(
        "SVG canvas {:.3}x{:.3} (spacing {:.3}, stroke {:.5})",
        width,
        height,
        spacing,
        stroke_width
    );

    let style = Style::new(format!(
        "\n  .circle_c {{ fill:{}; stroke: {}; stroke-width: {} }}\n",
        config.fill,
        config.stroke,
        fmt5(stroke_width)
    ))
    .set("type", "text/css");

    let mut root = Group::new().set(
        "transform",
        format!("translate({},{})", fmt5(width / 2.0), fmt5(height / 2.0)),
    );

    for circle in store.iter() {
        let title = Title::new().add(Text::new(format!(
            "{} (num={})",
            escape_text(circle.name.as_deref().unwrap_or("")),
            circle.area
        )));
        let shape = SvgCircle::new()
            .set("cx", fmt5(circle.x))
            .set("cy", fmt5(circle.y))
            .set("r", fmt5(circle.radius))
            .set(
                "style",
                format!("fill:{}", circle.color.as_deref().unwrap_or("")),
            )
            .set("class", "circle_c");
        root = root.add(Group::new().add(title).add(shape));
    }

    if config.debug_chain {
        if let Some(anchor) = packing.anchor {
            let members: Vec<_> = packing.chain.iter_from(anchor).collect();
            for (i, &from) in members.iter().enumerate() {
                let to = members[(i + 1) % members.len()];
                let (a, b) = (store.get(from), store.get(to));
                root = root.add(
                    Line::new()
                        .set("x1", fmt5(a.x))
                        .set("y1", fmt5(a.y))
                        .set("x2", fmt5(b.x))
                        .set("y2", fmt5(b.y))
                        .set(
                            "style",
                            format!("stroke:black;stroke-width:{:.1};", stroke_width),
                        ),
                );
            }
        }
    }

    Document::new()
        .set("height", config.viewport_height)
        .set("width", config.viewport_width)
        .set("viewBox", format!("0 0 {} {}", fmt5(width), fmt5(height)))
        .set("preserveAspectRatio", "xMidYMid meet")
        .add(Definitions::new().add(style))
        .add(root)
}

/// Serialize a document to `out`.
pub fn write_svg<W: Write>(out: W, document: &Document) -> std::io::Result<()> {
    svg::write(out, document)
}
