//! Parquet file handling for edge tables

use anyhow::{anyhow, Result};
use polars::prelude::*;

use crate::graph::{GraphBuilder, SocialGraph};

/// Load an undirected graph from a Parquet table with one edge per row.
///
/// Both columns are cast to strings, so integer ids work too. A row with only
/// one non-null endpoint declares an isolated node.
pub fn load_edge_table(path: &str, source_column: &str, target_column: &str) -> Result<SocialGraph> {
    log::info!("Reading parquet file: {}", path);

    if !std::path::Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?
        .select([col(source_column), col(target_column)])
        .collect()?;

    log::info!("Loaded {} edge rows", df.height());

    let sources = df.column(source_column)?.cast(&DataType::String)?;
    let targets = df.column(target_column)?.cast(&DataType::String)?;
    let sources = sources.str()?;
    let targets = targets.str()?;

    let mut builder = GraphBuilder::with_capacity(df.height(), df.height());
    let mut skipped = 0usize;

    for (src, dst) in sources.into_iter().zip(targets.into_iter()) {
        match (src, dst) {
            (Some(src), Some(dst)) => {
                builder.add_edge(src, dst);
            }
            (Some(node), None) | (None, Some(node)) => {
                builder.get_or_create_node(node);
            }
            (None, None) => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {} rows with no endpoints", skipped);
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported() {
        let err = load_edge_table("/no/such/edges.parquet", "source", "target").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn reads_integer_columns() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("edges.parquet");

        let mut df = polars::df!(
            "source" => [1i64, 2, 3],
            "target" => [2i64, 3, 1]
        )?;
        let file = std::fs::File::create(&path)?;
        ParquetWriter::new(file).finish(&mut df)?;

        let graph = load_edge_table(path.to_str().unwrap(), "source", "target")?;
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.node_index("1").is_some());
        Ok(())
    }
}
