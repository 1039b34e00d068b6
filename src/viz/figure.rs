//! Rendered figures and SVG output

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::graph::SocialGraph;
use crate::viz::layout::Point;

const CANVAS: f64 = 800.0;
const MARGIN: f64 = 60.0;
const NODE_RADIUS: f64 = 14.0;

pub const EDGE_COLOR: &str = "black";
pub const LABEL_COLOR: &str = "whitesmoke";
pub const INFLUENCER_COLOR: &str = "red";
pub const REGULAR_COLOR: &str = "green";

/// Viridis ramp, sampled at nine evenly spaced stops
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Color for community `id` when ids span `0..=max_id`
pub fn community_color(id: usize, max_id: usize) -> String {
    let t = if max_id == 0 { 0.0 } else { id as f64 / max_id as f64 };
    let scaled = t.clamp(0.0, 1.0) * (VIRIDIS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lower as f64;

    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r1, g1, b1) = VIRIDIS[lower];
    let (r2, g2, b2) = VIRIDIS[upper];
    format!("#{:02x}{:02x}{:02x}", mix(r1, r2), mix(g1, g2), mix(b1, b2))
}

#[derive(Debug, Clone)]
pub struct DrawnNode {
    pub label: String,
    pub position: Point,
    pub fill: String,
}

/// A drawn graph: positioned, colored nodes and the edges between them
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub nodes: Vec<DrawnNode>,
    /// Edges as positions into `nodes`
    pub edges: Vec<(usize, usize)>,
    pub with_labels: bool,
    /// Stroke drawn around every node, if any
    pub node_outline: Option<String>,
}

impl Figure {
    /// Assemble a figure for `graph`; `positions` and `fills` are indexed by node index
    pub fn new(
        title: impl Into<String>,
        graph: &SocialGraph,
        positions: &[Point],
        fills: Vec<String>,
        with_labels: bool,
    ) -> Self {
        let nodes = graph
            .nodes()
            .zip(fills)
            .map(|(node, fill)| DrawnNode {
                label: graph.label(node).to_string(),
                position: positions[node.index()],
                fill,
            })
            .collect();

        let edges = graph.edges().map(|(a, b)| (a.index(), b.index())).collect();

        Self {
            title: title.into(),
            nodes,
            edges,
            with_labels,
            node_outline: None,
        }
    }

    pub fn with_node_outline(mut self, color: impl Into<String>) -> Self {
        self.node_outline = Some(color.into());
        self
    }

    /// Node labels whose fill is `color`
    pub fn labels_with_fill(&self, color: &str) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|node| node.fill == color)
            .map(|node| node.label.as_str())
            .collect()
    }

    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    /// Write the figure as an SVG document
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        file.write_all(self.to_svg().as_bytes())?;
        log::info!("Saved figure \"{}\" to {}", self.title, path.display());
        Ok(())
    }
}

/// Map layout coordinates in [-1, 1] onto the canvas
fn to_canvas(p: Point) -> (f64, f64) {
    let span = (CANVAS - 2.0 * MARGIN) / 2.0;
    (MARGIN + (p.x + 1.0) * span, MARGIN + (1.0 - p.y) * span)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
            w = CANVAS,
            h = CANVAS
        )?;
        writeln!(f, "  <title>{}</title>", escape(&self.title))?;
        writeln!(f, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

        for &(a, b) in &self.edges {
            let (x1, y1) = to_canvas(self.nodes[a].position);
            let (x2, y2) = to_canvas(self.nodes[b].position);
            writeln!(
                f,
                r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
                x1, y1, x2, y2, EDGE_COLOR
            )?;
        }

        for node in &self.nodes {
            let (cx, cy) = to_canvas(node.position);
            let stroke = match &self.node_outline {
                Some(color) => format!(r#" stroke="{}" stroke-width="1.5""#, color),
                None => String::new(),
            };
            writeln!(
                f,
                r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"{}/>"#,
                cx, cy, NODE_RADIUS, node.fill, stroke
            )?;
        }

        if self.with_labels {
            for node in &self.nodes {
                let (x, y) = to_canvas(node.position);
                writeln!(
                    f,
                    r#"  <text x="{:.1}" y="{:.1}" fill="{}" font-size="10" font-family="sans-serif" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                    x,
                    y,
                    LABEL_COLOR,
                    escape(&node.label)
                )?;
            }
        }

        writeln!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn community_colors_span_the_ramp() {
        assert_eq!(community_color(0, 4), "#440154");
        assert_eq!(community_color(4, 4), "#fde725");
        assert_eq!(community_color(0, 0), "#440154");
        assert_ne!(community_color(1, 4), community_color(2, 4));
    }

    #[test]
    fn svg_contains_nodes_edges_and_escaped_labels() {
        let graph = SocialGraph::from_edges([("a&b", "c")]);
        let positions = vec![Point { x: -1.0, y: 0.0 }, Point { x: 1.0, y: 0.0 }];
        let figure = Figure::new(
            "test",
            &graph,
            &positions,
            vec![INFLUENCER_COLOR.to_string(), REGULAR_COLOR.to_string()],
            true,
        )
        .with_node_outline("black");

        let svg = figure.to_svg();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("a&amp;b"));
        assert!(svg.contains(r#"stroke="black" stroke-width="1.5""#));
        assert_eq!(figure.labels_with_fill(INFLUENCER_COLOR), vec!["a&b"]);
    }

    #[test]
    fn labels_can_be_hidden() {
        let graph = SocialGraph::from_edges([(1, 2)]);
        let positions = vec![Point { x: 0.0, y: 0.0 }; 2];
        let figure = Figure::new("plain", &graph, &positions, vec!["green".into(); 2], false);
        assert!(!figure.to_svg().contains("<text"));
    }
}
