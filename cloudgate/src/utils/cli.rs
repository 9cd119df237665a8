use clap::Parser;

use crate::config::{Backend, Config, DEFAULT_REGION, DEFAULT_TABLE};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Gateway listening host
    #[arg(long, env = "CLOUDGATE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Gateway listening port
    #[arg(short, long, env = "CLOUDGATE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Region used for every S3 and DynamoDB call
    #[arg(short, long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// DynamoDB table the item endpoints operate on
    #[arg(short, long, env = "DYNAMODB_TABLE", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Endpoint override for S3-compatible and DynamoDB-compatible services
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Storage backend type
    #[arg(
        short,
        long,
        env = "CLOUDGATE_BACKEND",
        value_enum,
        ignore_case = true,
        default_value = "aws"
    )]
    pub backend: Backend,
}

/// Checks the parsed arguments and turns them into the runtime [`Config`].
/// All problems are reported together.
pub fn validate_config(args: &Args) -> Result<Config, Vec<String>> {
    let mut validation_errors = Vec::new();

    if args.region.trim().is_empty() {
        validation_errors.push("AWS_REGION must not be empty".to_string());
    }
    if args.table.trim().is_empty() {
        validation_errors.push("DYNAMODB_TABLE must not be empty".to_string());
    }
    let endpoint_url = args
        .endpoint_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    if let Some(url) = endpoint_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            validation_errors.push(format!(
                "AWS_ENDPOINT_URL `{url}` must start with http:// or https://"
            ));
        }
    }

    if !validation_errors.is_empty() {
        return Err(validation_errors);
    }

    Ok(Config {
        host: args.host.clone(),
        port: args.port,
        region: args.region.trim().to_string(),
        table_name: args.table.trim().to_string(),
        endpoint_url: endpoint_url.map(str::to_string),
        backend: args.backend,
    })
}
