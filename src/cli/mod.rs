mod check;
mod run;
mod show;

use crate::error::Result;
use clap::{Parser, Subcommand};

pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "ads-report-loader")]
#[command(about = "Append yesterday's Meta ads performance to a Google Sheets report", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            None | Some(Commands::Run) => run::execute().await,
            Some(Commands::Check) => check::execute().await,
            Some(Commands::Show { resource }) => resource.execute().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch insights for every account and append them to the sheet (default)
    Run,
    /// Check API access for every configured account without writing
    Check,
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}
