use std::path::Path;

use anyhow::Result;
use clap::Parser;

use social_graph_analyzer::data::{self, InputFormat};
use social_graph_analyzer::{draw_community_with_node, problem_solver, summarize, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "social-graph-analyzer",
    about = "Degree, centrality and community report for an undirected graph"
)]
struct Cli {
    /// Path to the input graph (edge list or Parquet edge table)
    #[clap(long)]
    input: String,

    /// Input format
    #[clap(long, value_enum, default_value = "auto")]
    format: InputFormat,

    /// Source column of a Parquet edge table
    #[clap(long, default_value = "source")]
    source_column: String,

    /// Target column of a Parquet edge table
    #[clap(long, default_value = "target")]
    target_column: String,

    /// Output directory for rendered figures
    #[clap(long, default_value = "sna_results")]
    output_dir: String,

    /// Also draw the community containing this node
    #[clap(long)]
    node: Option<String>,

    /// Seed for Louvain community detection (random when omitted)
    #[clap(long)]
    louvain_seed: Option<u64>,

    /// Seed for the spring layout
    #[clap(long, default_value = "394")]
    layout_seed: u64,

    /// Size of the betweenness/closeness lists influencers are drawn from
    #[clap(long, default_value = "3")]
    influencer_top_n: usize,

    /// Hide node labels in figures
    #[clap(long)]
    no_labels: bool,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Print the summary as JSON
    #[clap(long)]
    json: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting social graph analysis");
    log::info!("Input: {}", args.input);

    let graph = data::load_graph(
        &args.input,
        args.format,
        &args.source_column,
        &args.target_column,
    )?;

    let mut config = Config::default()
        .with_layout_seed(Some(args.layout_seed))
        .with_labels(!args.no_labels)
        .with_influencer_top_n(args.influencer_top_n);
    if let Some(seed) = args.louvain_seed {
        config = config.with_louvain_seed(seed);
    }

    if args.skip_viz {
        let summary = summarize(&graph, &config)?;
        print_summary(&summary, args.json)?;
        return Ok(());
    }

    let report = problem_solver(&graph, &config)?;
    print_summary(&report.summary, args.json)?;

    let output_dir = Path::new(&args.output_dir);
    std::fs::create_dir_all(output_dir)?;

    let communities_path = output_dir.join("communities.svg");
    report.communities.save(&communities_path)?;
    let influencers_path = output_dir.join("influencers.svg");
    report.influencers.save(&influencers_path)?;

    if !args.json {
        println!("The graph showing the communities: {}", communities_path.display());
        println!();
        println!(
            "The graph showing the influencer nodes (red for influencers, green for the rest): {}",
            influencers_path.display()
        );
        println!();
    }

    if let Some(node) = &args.node {
        let figure = draw_community_with_node(&graph, node, &config)?;
        let path = output_dir.join(format!("community_{}.svg", file_stem(node)));
        figure.save(&path)?;
        if !args.json {
            println!("The community of node {}: {}", node, path.display());
        }
    }

    log::info!("Analysis complete. Figures saved to {}", args.output_dir);

    Ok(())
}

fn print_summary(summary: &social_graph_analyzer::Summary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

/// Node label reduced to characters safe in a file name
fn file_stem(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
