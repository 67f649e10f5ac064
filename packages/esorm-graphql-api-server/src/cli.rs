pub(crate) use crate::commands::{run, sdl};
use clap::{Parser, Subcommand};
use esorm_graphql_lib::config::ServiceArgs;

#[derive(Parser, Debug)]
#[clap(
    name = "esorm-graphql-api-server",
    about = "GraphQL API server over document-store models",
    version,
    rename_all = "kebab-case"
)]
pub struct Opt {
    #[clap(subcommand)]
    command: ApiServer,
}

#[derive(Debug, Subcommand)]
pub enum ApiServer {
    /// Serve the generated schema over HTTP.
    Run(ServiceArgs),
    /// Print the generated schema.
    Sdl(ServiceArgs),
}

pub async fn run_cli() -> anyhow::Result<()> {
    let opt = Opt::try_parse();

    match opt {
        Ok(opt) => match opt.command {
            ApiServer::Run(args) => run::exec(args).await,
            ApiServer::Sdl(args) => sdl::exec(args).await,
        },
        Err(e) => {
            // Prints the error and exits.
            e.exit()
        }
    }
}
