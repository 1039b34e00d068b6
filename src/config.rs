//! Configuration management for the social graph analyzer

/// Tunables shared by the analysis, community and drawing functions
#[derive(Debug, Clone)]
pub struct Config {
    /// How many top betweenness/closeness nodes a community's influencers are drawn from
    pub influencer_top_n: usize,

    /// Louvain resolution; higher values favor smaller communities
    pub louvain_resolution: f64,

    /// Seed for Louvain's node ordering (None = fresh entropy on every run)
    pub louvain_seed: Option<u64>,

    /// Lanczos restart budget for eigenvector centrality on large graphs
    pub eigenvector_max_restarts: usize,

    /// Relative Ritz residual at which Lanczos stops
    pub eigenvector_tolerance: f64,

    /// Seed for the spring layout's initial positions (None = fresh entropy)
    pub layout_seed: Option<u64>,

    /// Number of spring layout iterations
    pub layout_iterations: usize,

    /// Draw node labels on figures
    pub with_labels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            influencer_top_n: 3,
            louvain_resolution: 1.0,
            louvain_seed: None,
            eigenvector_max_restarts: 200,
            eigenvector_tolerance: 1e-10,
            layout_seed: Some(394),
            layout_iterations: 50,
            with_labels: true,
        }
    }
}

impl Config {
    /// Fix the Louvain seed so repeated runs give the same partition
    pub fn with_louvain_seed(mut self, seed: u64) -> Self {
        self.louvain_seed = Some(seed);
        self
    }

    pub fn with_layout_seed(mut self, seed: Option<u64>) -> Self {
        self.layout_seed = seed;
        self
    }

    pub fn with_labels(mut self, with_labels: bool) -> Self {
        self.with_labels = with_labels;
        self
    }

    pub fn with_influencer_top_n(mut self, top_n: usize) -> Self {
        self.influencer_top_n = top_n;
        self
    }

    pub fn with_louvain_resolution(mut self, resolution: f64) -> Self {
        self.louvain_resolution = resolution;
        self
    }
}
