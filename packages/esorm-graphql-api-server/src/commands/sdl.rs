use crate::{api::build_schema, commands::run::service_config};
use esorm_graphql::sdl::PrettySdl;
use esorm_graphql_lib::config::ServiceArgs;

pub async fn exec(args: ServiceArgs) -> anyhow::Result<()> {
    let config = service_config(args)?;
    let schema = build_schema(&config).await?;
    println!("{}", schema.pretty_sdl());
    Ok(())
}
