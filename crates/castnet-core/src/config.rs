use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level pipeline configuration, loaded from an optional `castnet.toml`
/// in the working directory. CLI flags override file values; file values
/// override the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory holding input CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory for the network visualization (DOT and PNG).
    #[serde(default = "default_viz_dir")]
    pub viz_dir: PathBuf,
    /// Directory for the centrality CSV table.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            viz_dir: default_viz_dir(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Input CSV file name, resolved relative to `paths.data_dir`.
    #[serde(default = "default_input_file")]
    pub file: String,
    /// Rows whose label column equals this value are kept.
    #[serde(default = "default_label_value")]
    pub label: String,
    /// Header name of the label column.
    #[serde(default = "default_label_column")]
    pub label_column: String,
    /// Header name of the document text column.
    #[serde(default = "default_text_column")]
    pub text_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            file: default_input_file(),
            label: default_label_value(),
            label_column: default_label_column(),
            text_column: default_text_column(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Minimum co-occurrence weight (exclusive) for an edge to survive.
    #[serde(default = "default_min_edge_weight")]
    pub min_edge_weight: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            min_edge_weight: default_min_edge_weight(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Layout canvas width/height in points (the canvas is square).
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
    /// Seed for the randomized layout. `None` draws from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_size: default_canvas_size(),
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Resolve the input CSV path: `paths.data_dir` joined with the file name.
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.paths.data_dir.join(&self.dataset.file)
    }

    /// Path for the DOT rendering of the filtered network.
    #[must_use]
    pub fn dot_path(&self) -> PathBuf {
        self.paths.viz_dir.join("network.dot")
    }

    /// Path for the raster rendering of the filtered network.
    #[must_use]
    pub fn png_path(&self) -> PathBuf {
        self.paths.viz_dir.join("network.png")
    }

    /// Path for the merged centrality table.
    #[must_use]
    pub fn table_path(&self) -> PathBuf {
        self.paths.output_dir.join("final_df.csv")
    }
}

/// Load `castnet.toml` from `root`, falling back to defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<PipelineConfig> {
    let path = root.join("castnet.toml");
    if !path.exists() {
        return Ok(PipelineConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<PipelineConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_viz_dir() -> PathBuf {
    PathBuf::from("viz")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_input_file() -> String {
    "fake_or_real_news.csv".to_string()
}

fn default_label_value() -> String {
    "REAL".to_string()
}

fn default_label_column() -> String {
    "label".to_string()
}

fn default_text_column() -> String {
    "text".to_string()
}

const fn default_min_edge_weight() -> u32 {
    10
}

const fn default_canvas_size() -> u32 {
    1000
}
