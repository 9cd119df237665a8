use clap::ValueEnum;

/// Default region, and the one region S3 refuses as an explicit location constraint.
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_TABLE: &str = "MyTable";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// S3 and DynamoDB through the AWS SDK and ambient credentials.
    Aws,
    /// In-process buckets and table, nothing leaves the process.
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub region: String,
    pub table_name: String,
    pub endpoint_url: Option<String>,
    pub backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            region: DEFAULT_REGION.to_string(),
            table_name: DEFAULT_TABLE.to_string(),
            endpoint_url: None,
            backend: Backend::Aws,
        }
    }
}
