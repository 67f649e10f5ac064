use crate::api::{build_schema, GraphQlApi};
use esorm_graphql_lib::{
    config::{ServiceArgs, ServiceConfig},
    utils::init_logging,
};
use tracing::info;

pub(crate) fn service_config(args: ServiceArgs) -> anyhow::Result<ServiceConfig> {
    Ok(match &args.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::from(args),
    })
}

pub async fn exec(args: ServiceArgs) -> anyhow::Result<()> {
    let config = service_config(args)?;

    init_logging(&config)?;

    info!("Configuration: {:?}", config);

    let schema = build_schema(&config).await?;

    GraphQlApi::run(config, schema).await?;

    Ok(())
}
