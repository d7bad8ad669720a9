//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, TokenAction};
use crate::client::{ApiClient, RequestSpec};
use crate::error::{Error, Result, ResultExt};
use crate::registry::{load_hosts_file, InMemoryHostRegistry};
use crate::tokens::FileTokenStore;
use crate::types::{JsonValue, Method};
use serde_json::json;
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Hosts => self.hosts().await,
            Commands::Authenticate { host_id } => self.authenticate(host_id).await,
            Commands::Request {
                host_id,
                path,
                method,
                data,
                retries,
            } => {
                self.request(host_id, path, method, data.as_deref(), *retries)
                    .await
            }
            Commands::Token { action } => self.token(action).await,
        }
    }

    /// Load the host registry from the hosts file
    fn load_registry(&self) -> Result<InMemoryHostRegistry> {
        load_hosts_file(&self.cli.hosts)
    }

    /// Open the token cache file
    fn open_tokens(&self) -> Result<FileTokenStore> {
        FileTokenStore::from_file(&self.cli.tokens)
            .with_context(|| format!("Failed to open token cache {}", self.cli.tokens.display()))
    }

    /// Build a client over the configured registry and token cache
    fn build_client(&self) -> Result<ApiClient> {
        let registry = self.load_registry()?;
        let tokens = self.open_tokens()?;
        Ok(ApiClient::new(Arc::new(registry), Arc::new(tokens)))
    }

    /// List registered hosts (credentials are never printed)
    async fn hosts(&self) -> Result<()> {
        let registry = self.load_registry()?;
        let hosts = registry.hosts().await;

        match self.cli.format {
            OutputFormat::Json => {
                for host in hosts {
                    let line = json!({
                        "id": host.id,
                        "url": host.url,
                        "port": host.port,
                        "username": host.username,
                    });
                    println!("{line}");
                }
            }
            OutputFormat::Pretty => {
                for host in hosts {
                    println!("{:<20} {}:{} ({})", host.id, host.url, host.port, host.username);
                }
            }
        }

        Ok(())
    }

    /// Authenticate against a host and cache the token
    async fn authenticate(&self, host_id: &str) -> Result<()> {
        let client = self.build_client()?;
        let token = client.authenticate(host_id).await?;

        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", json!({"host": host_id, "token": token}));
            }
            OutputFormat::Pretty => {
                println!(
                    "Token for '{host_id}' cached in {}",
                    self.cli.tokens.display()
                );
            }
        }

        Ok(())
    }

    /// Issue an authenticated request and print the response body
    async fn request(
        &self,
        host_id: &str,
        path: &str,
        method: &str,
        data: Option<&str>,
        retries: Option<u32>,
    ) -> Result<()> {
        let method: Method = method.parse()?;
        let body: Option<JsonValue> = data
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| Error::config(format!("Invalid JSON body: {e}")))?;

        let mut spec = RequestSpec::new(method, path, host_id);
        spec.body = body;
        if let Some(retries) = retries {
            spec = spec.max_attempts(retries);
        }

        let client = self.build_client()?;
        let response = client.execute(spec).await?;

        match self.cli.format {
            OutputFormat::Json => println!("{response}"),
            OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&response)?),
        }

        Ok(())
    }

    /// Inspect or clear the token cache
    async fn token(&self, action: &TokenAction) -> Result<()> {
        let tokens = self.open_tokens()?;

        match action {
            TokenAction::Show => {
                for (host_id, stored) in tokens.entries().await {
                    match self.cli.format {
                        OutputFormat::Json => {
                            println!("{}", json!({"host": host_id, "token": stored}));
                        }
                        OutputFormat::Pretty => {
                            println!(
                                "{:<20} issued {} ({})",
                                host_id,
                                stored.issued_at.to_rfc3339(),
                                preview(&stored.token)
                            );
                        }
                    }
                }
            }
            TokenAction::Clear { host_id: Some(id) } => {
                if tokens.remove(id).await?.is_some() {
                    println!("Cleared token for '{id}'");
                } else {
                    println!("No cached token for '{id}'");
                }
            }
            TokenAction::Clear { host_id: None } => {
                tokens.clear().await?;
                println!("Cleared all cached tokens");
            }
        }

        Ok(())
    }
}

/// Short prefix of a token for display
fn preview(token: &str) -> String {
    let prefix: String = token.chars().take(8).collect();
    if token.chars().count() > 8 {
        format!("{prefix}…")
    } else {
        prefix
    }
}
