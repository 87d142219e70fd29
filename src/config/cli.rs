use crate::domain::model::UserData;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "astro-insight")]
#[command(about = "Birth chart effects with retrieval-augmented astrological insights")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./astro-insight.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the birth chart and planetary effects
    Chart {
        #[command(flatten)]
        user: UserArgs,

        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Answer a question using the chart and the knowledge base
    Ask {
        #[command(flatten)]
        user: UserArgs,

        /// Override vector_store.path from the config
        #[arg(long)]
        vector_store: Option<String>,
    },

    /// Build the vector index from a directory of text documents
    Index {
        /// Override indexing.documents_path from the config
        #[arg(long)]
        documents: Option<String>,

        /// Override vector_store.path from the config
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub name: String,

    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: String,

    /// Time of birth, HH:MM
    #[arg(long)]
    pub time_of_birth: String,

    #[arg(long)]
    pub place_of_birth: String,

    #[arg(long, default_value = "unspecified")]
    pub gender: String,

    #[arg(long, default_value = "")]
    pub query: String,
}

impl From<UserArgs> for UserData {
    fn from(args: UserArgs) -> Self {
        Self {
            name: args.name,
            dob: args.dob,
            time_of_birth: args.time_of_birth,
            place_of_birth: args.place_of_birth,
            gender: args.gender,
            query: args.query,
        }
    }
}
