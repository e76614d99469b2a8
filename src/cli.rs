use clap::Parser;

#[derive(Parser)]
#[command(
    name = "urlsum",
    about = "Summarize a YouTube video or a website from its URL",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube or website URL (starts an interactive session if omitted)
    pub url: Option<String>,

    /// Ask for a Groq API key override even when a URL is given
    #[arg(short = 'k', long)]
    pub api_key_prompt: bool,

    /// LLM model for summarization [default: llama-3.1-8b-instant]
    #[arg(short, long)]
    pub model: Option<String>,

    /// Preferred caption language [default: en]
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Number of chunks to summarize [default: 5]
    #[arg(long)]
    pub max_chunks: Option<usize>,

    /// Show per-chunk progress and the config in use
    #[arg(short, long)]
    pub verbose: bool,
}
