//! CLI runner - executes commands

use crate::auth::Account;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::group::GroupClient;
use crate::pagination::PageStream;
use serde::Serialize;
use tracing::debug;

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
        let config = self.load_config()?;
        let group_id = self
            .cli
            .group
            .ok_or_else(|| Error::config("Group not specified (use -g flag)"))?;
        let account = Account::from_option(self.cli.cookie.clone());
        debug!("Connecting to group {} as {:?}", group_id, account);

        let client = GroupClient::connect(group_id, account, config).await?;

        match &self.cli.command {
            Commands::Info => self.output(client.group()),
            Commands::Roles => self.output(&client.get_group_roles().await?),
            Commands::MemberRole { user } => self.output(&client.get_member_role(*user).await?),
            Commands::Promote { user } => self.output(&client.promote(*user).await?),
            Commands::Demote { user } => self.output(&client.demote(*user).await?),
            Commands::ChangeRank { user, delta } => {
                self.output(&client.change_rank(*user, *delta).await?)
            }
            Commands::SetRank { user, role } => {
                client.set_rank(*user, *role).await?;
                self.output(&serde_json::json!({ "user": user, "role": role }))
            }
            Commands::Exile { user } => {
                client.exile_member(*user).await?;
                self.output(&serde_json::json!({ "exiled": user }))
            }
            Commands::Shout => self.output(client.get_shout()?),
            Commands::PostShout { message } => {
                client.post_shout(message).await?;
                self.output(&serde_json::json!({ "posted": message }))
            }
            Commands::JoinRequests { pages } => {
                self.drain(client.fetch_join_requests(*pages)?).await
            }
            Commands::Posts { pages } => self.drain(client.fetch_group_posts(*pages)?).await,
        }
    }

    /// Load config file and apply command-line overrides
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };

        if let Some(url) = &self.cli.api_url {
            config = config.with_groups_api_url(url);
            config.validate()?;
        }

        Ok(config)
    }

    /// Print items page by page as they arrive
    async fn drain<T: Serialize>(&self, mut stream: PageStream<T>) -> Result<()> {
        while let Some(page) = stream.next_page().await {
            debug!("Page {} with {} items", page.number, page.len());
            for item in page {
                self.output(&item)?;
            }
        }

        match stream.take_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn output<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}
