use super::Parser;

#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    /// Override the configured storage backend ("memory" or "file").
    #[arg(long)]
    pub storage: Option<String>,
}
