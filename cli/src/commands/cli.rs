use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "promptbatch", about = "Batch prompt dispatch across completion providers")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a template against a row file and collect provider outputs.
    Run(RunArgs),

    /// List the providers in the catalog.
    Providers(ProvidersArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Template text with {{variable}} placeholders.
    #[arg(long, group = "input")]
    pub template: Option<String>,

    /// Read the template from a file instead.
    #[arg(long, group = "input")]
    pub template_file: Option<String>,

    /// JSON file holding the rows: an array of flat objects.
    #[arg(long)]
    pub rows: String,

    /// Provider catalog file (TOML). Defaults to the configured path.
    #[arg(long)]
    pub providers_file: Option<String>,

    /// Provider ids to dispatch to. Defaults to every catalog entry.
    #[arg(long = "select", value_delimiter = ',')]
    pub select: Vec<String>,

    /// Maximum tasks in flight at once.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-attempt timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Total attempts per task.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Where to write the finalized grid (JSON). Defaults to
    /// Results_<timestamp>.json in the current directory.
    #[arg(long)]
    pub output: Option<String>,

    /// Suppress the progress bar.
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ProvidersArgs {
    /// Provider catalog file (TOML). Defaults to the configured path.
    #[arg(long)]
    pub providers_file: Option<String>,
}
