use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

use worksheet_generator::models::DEFAULT_QUESTIONS_COUNT;
use worksheet_generator::services::to_plain_text;
use worksheet_generator::utils::logging;
use worksheet_generator::{App, Config, WorksheetRequest};

#[derive(Parser)]
#[command(name = "worksheet", version, about = "Printable K-5 worksheets generated by an LLM")]
struct Cli {
    /// TOML 配置文件路径（也可以用 WORKSHEET_CONFIG 指定）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new worksheet and save it to history.
    Generate {
        /// math | puzzle | word-problem | logic
        #[arg(long = "type", default_value = "math")]
        kind: String,

        /// Math topic, e.g. Addition, Fractions, Money, Random.
        #[arg(long)]
        subject: Option<String>,

        /// K, 1, 2, 3, 4 or 5.
        #[arg(long, default_value = "K")]
        grade: String,

        /// easy | medium | hard
        #[arg(long, default_value = "easy")]
        difficulty: String,

        /// Number of questions (5, 10 or 15 recommended).
        #[arg(long, default_value_t = DEFAULT_QUESTIONS_COUNT)]
        count: u32,

        /// Show answers and explanations in the preview.
        #[arg(long)]
        answers: bool,
    },

    /// List saved worksheets, newest first.
    History,

    /// Print a saved worksheet.
    Show {
        id: String,

        #[arg(long)]
        answers: bool,
    },

    /// Export a saved worksheet as a printable document.
    Export {
        id: String,

        /// Include answers (defaults to the setting used at generation time).
        #[arg(long)]
        answers: Option<bool>,
    },

    /// Delete one worksheet from history.
    Delete { id: String },

    /// Delete all worksheets from history.
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let app = App::initialize(config);

    if let Err(e) = run(&app, cli.command).await {
        error!("❌ {}", e);
        return Err(e.into());
    }

    Ok(())
}

async fn run(app: &App, command: Commands) -> worksheet_generator::AppResult<()> {
    match command {
        Commands::Generate {
            kind,
            subject,
            grade,
            difficulty,
            count,
            answers,
        } => {
            let request = WorksheetRequest {
                kind,
                subject,
                grade,
                difficulty,
                questions_count: Some(count),
                include_answers: answers,
            };
            let worksheet = app.generate(request).await?;
            println!("{} ({})\n", worksheet.title, worksheet.id);
            println!("{}", App::preview(&worksheet));
        }
        Commands::History => {
            logging::log_history(&app.history().await);
        }
        Commands::Show { id, answers } => {
            let worksheet = app.show(&id).await?;
            println!("{}\n", worksheet.title);
            println!("{}", to_plain_text(&worksheet, answers));
        }
        Commands::Export { id, answers } => {
            let handle = app.export(&id, answers).await?;
            println!("{}", handle);
        }
        Commands::Delete { id } => app.delete(&id).await?,
        Commands::Clear => app.clear().await?,
    }

    Ok(())
}
