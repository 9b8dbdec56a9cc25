#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand, ValueEnum};
use parley_core::ContextSource;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;
mod console;

use command::{
    AskInput, AskStrategy, CalcStrategy, ChatInput, ChatStrategy, CommandStrategy, DemoStrategy,
    InfoStrategy, InitStrategy, MenuStrategy, SuggestInput, SuggestStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "parley")]
#[command(
    about = "Conversational answers backed by search, Wikipedia and an LLM",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ContextArg {
    #[value(name = "none")]
    Plain,
    #[value(alias = "web")]
    Search,
    #[value(alias = "wiki", alias = "wikipedia")]
    Encyclopedia,
}

impl From<ContextArg> for ContextSource {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Plain => Self::None,
            ContextArg::Search => Self::Search,
            ContextArg::Encyclopedia => Self::Encyclopedia,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Answer questions, optionally augmented with search or Wikipedia context
    Ask {
        /// Context provider to consult before answering
        #[arg(short, long, value_enum)]
        context: Option<ContextArg>,

        /// Single question to answer (interactive when omitted)
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,
    },
    /// Conversation that remembers the last few turns
    Chat {
        /// Single message to send (interactive when omitted)
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// Number of turns to remember
        #[arg(short = 'k', long)]
        window: Option<usize>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,
    },
    /// Suggest restaurant names for a cuisine and atmosphere
    Suggest {
        #[arg(short, long, requires = "atmosphere")]
        cuisine: Option<String>,

        #[arg(short, long, requires = "cuisine")]
        atmosphere: Option<String>,
    },
    /// Generate a restaurant name and a menu for it
    Menu {
        #[arg(short, long, default_value = "bengali")]
        cuisine: String,
    },
    /// Interactive menu with all agents
    Demo,
    /// Evaluate an arithmetic expression
    Calc {
        /// Expression using numbers, + - * / and parentheses
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,
    },
    /// Show the resolved configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Ask {
            context,
            message,
            model,
        } => {
            AskStrategy
                .execute(AskInput {
                    context: context.map(ContextSource::from),
                    message,
                    model,
                })
                .await?;
        }
        Commands::Chat {
            message,
            window,
            model,
        } => {
            ChatStrategy
                .execute(ChatInput {
                    message,
                    window,
                    model,
                })
                .await?;
        }
        Commands::Suggest {
            cuisine,
            atmosphere,
        } => {
            let preset = cuisine.zip(atmosphere);
            SuggestStrategy.execute(SuggestInput { preset }).await?;
        }
        Commands::Menu { cuisine } => MenuStrategy.execute(cuisine).await?,
        Commands::Demo => DemoStrategy.execute(()).await?,
        Commands::Calc { expression } => CalcStrategy.execute(expression.join(" ")).await?,
        Commands::Info => InfoStrategy.execute(()).await?,
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
