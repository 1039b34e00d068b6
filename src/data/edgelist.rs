//! Plain-text edge lists

use std::fs;

use anyhow::{Context, Result};

use crate::graph::{GraphBuilder, SocialGraph};

/// Parse an edge list: one `source target` pair per line, separated by
/// whitespace or commas. Blank lines and `#` comments are skipped, a line
/// with a single token declares an isolated node, and columns after the
/// second (weights, timestamps) are ignored.
pub fn parse_edge_list(text: &str) -> SocialGraph {
    let mut builder = GraphBuilder::new();
    let mut extra_columns = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty());

        match (tokens.next(), tokens.next()) {
            (Some(src), Some(dst)) => {
                builder.add_edge(src, dst);
                if tokens.next().is_some() {
                    extra_columns += 1;
                }
            }
            (Some(node), None) => {
                builder.get_or_create_node(node);
            }
            _ => {}
        }
    }

    if extra_columns > 0 {
        log::debug!("Ignored extra columns on {} lines", extra_columns);
    }

    builder.build()
}

/// Load an edge list file
pub fn load_edge_list(path: &str) -> Result<SocialGraph> {
    log::info!("Reading edge list: {}", path);
    let text = fs::read_to_string(path).with_context(|| format!("reading edge list {}", path))?;
    Ok(parse_edge_list(&text))
}
