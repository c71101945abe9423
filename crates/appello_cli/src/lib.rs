//! Command-line interface for the Appello GraphQL API.
//!
//! # Usage
//!
//! ```bash
//! # Credentials come from flags or API_BASE_URL, API_KEY, API_SECRET,
//! # API_USERNAME and API_PASSWORD
//!
//! # Run the demonstration sequence
//! appello demo
//!
//! # Send a raw document
//! appello query '{ me { id fullName } }'
//!
//! # Company operations
//! appello companies list --take 5
//! appello companies update <ID> --name "Renamed"
//! appello companies records --order-by createdAt --direction desc --where isArchived=false
//!
//! # Check that the session token can be renewed
//! appello renew
//! ```

pub mod demo;

use appello_sdk::resources::companies::types::{
    CompanyPatch, ListOptions, NewCompany, SortDirection, TableRecordSetOptions,
};
use appello_sdk::{AppelloClient, ClientConfig, Response};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "appello")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "appello_sdk=debug,appello_cli=debug"
        } else if self.quiet {
            "appello_sdk=warn,appello_cli=warn"
        } else {
            "appello_sdk=info,appello_cli=info"
        }
    }
}

/// Connection settings; every value falls back to an environment variable
/// and then to an empty string.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the Appello API
    #[arg(long, env = "API_BASE_URL", default_value = "", global = true)]
    pub base_url: String,

    /// Application key
    #[arg(long = "key", env = "API_KEY", default_value = "", global = true)]
    pub api_key: String,

    /// Application secret
    #[arg(
        long = "secret",
        env = "API_SECRET",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    pub api_secret: String,

    /// User name to log in with
    #[arg(long, env = "API_USERNAME", default_value = "", global = true)]
    pub username: String,

    /// Password to log in with
    #[arg(
        long,
        env = "API_PASSWORD",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    pub password: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url, &self.api_key, &self.api_secret)
            .timeout(Duration::from_secs(self.timeout))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full demonstration sequence (default)
    Demo,

    /// Send a raw GraphQL document
    Query {
        /// GraphQL document text
        document: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },

    /// Company operations
    #[command(subcommand)]
    Companies(CompanyCommands),

    /// Log in, then renew the session token
    Renew,
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// List company ids and names
    List {
        #[arg(long)]
        take: Option<u32>,

        #[arg(long)]
        skip: Option<u32>,
    },

    /// Show one company
    Get { id: String },

    /// Create a company
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        company_type_id: String,
    },

    /// Update the given fields of a company
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        company_type_id: Option<String>,
    },

    /// Delete a company
    Delete { id: String },

    /// Archive a company
    Archive { id: String },

    /// Restore an archived company
    Restore { id: String },

    /// Show the company table columns
    Columns,

    /// Fetch rows of the company table
    Records {
        #[arg(long)]
        take: Option<u32>,

        #[arg(long)]
        skip: Option<u32>,

        /// Free-text search term
        #[arg(long)]
        search: Option<String>,

        /// Column to sort on
        #[arg(long)]
        order_by: Option<String>,

        /// Sort direction
        #[arg(long, value_enum, default_value = "asc")]
        direction: Direction,

        /// `column=value` condition; the value is parsed as JSON when possible
        #[arg(long = "where", value_parser = parse_condition)]
        conditions: Vec<(String, Value)>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Asc,
    Desc,
}

impl From<Direction> for SortDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortDirection::Asc,
            Direction::Desc => SortDirection::Desc,
        }
    }
}

fn parse_condition(raw: &str) -> Result<(String, Value), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected column=value, got {raw:?}"))?;
    if column.is_empty() {
        return Err(format!("missing column in {raw:?}"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((column.to_string(), value))
}

/// Authenticates and runs the selected command. Returns the exit code.
pub async fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let connection = cli.connection;
    let client = AppelloClient::new(connection.client_config())?;

    info!(username = %connection.username, "authenticating");
    client
        .authenticate_user(&connection.username, &connection.password)
        .await?;

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => demo::run(&client).await,
        Commands::Query {
            document,
            variables,
        } => {
            let variables: Value = match variables {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Value::Object(serde_json::Map::new()),
            };
            let response: Response<Value> = client.query(document, variables).await?;
            report("GraphQL Response", &response)
        }
        Commands::Companies(command) => run_company_command(&client, command).await,
        Commands::Renew => {
            client.renew_token().await?;
            println!("{} session token renewed", "Success:".green().bold());
            Ok(0)
        }
    }
}

async fn run_company_command(
    client: &AppelloClient,
    command: CompanyCommands,
) -> Result<i32, Box<dyn std::error::Error>> {
    let companies = client.companies();

    match command {
        CompanyCommands::List { take, skip } => {
            let options = ListOptions { take, skip };
            report("Companies List", &companies.get_list(options).await?)
        }
        CompanyCommands::Get { id } => {
            report("Company Record", &companies.get_record(&id).await?)
        }
        CompanyCommands::Create {
            name,
            description,
            company_type_id,
        } => {
            let data = NewCompany {
                name,
                description,
                company_type_id,
            };
            report("New Company Record", &companies.create_record(data).await?)
        }
        CompanyCommands::Update {
            id,
            name,
            description,
            company_type_id,
        } => {
            let patch = CompanyPatch {
                name,
                description,
                company_type_id,
            };
            if patch.is_empty() {
                eprintln!("{} nothing to update", "Error:".red().bold());
                return Ok(2);
            }
            report(
                "Updated Company Record",
                &companies.update_record(&id, patch).await?,
            )
        }
        CompanyCommands::Delete { id } => {
            report("Deleted Company Record", &companies.delete_record(&id).await?)
        }
        CompanyCommands::Archive { id } => {
            report("Archived Company Record", &companies.archive_record(&id).await?)
        }
        CompanyCommands::Restore { id } => {
            report("Restored Company Record", &companies.restore_record(&id).await?)
        }
        CompanyCommands::Columns => {
            report("Company Table Columns", &companies.get_table_columns().await?)
        }
        CompanyCommands::Records {
            take,
            skip,
            search,
            order_by,
            direction,
            conditions,
        } => {
            let mut options = TableRecordSetOptions {
                take,
                skip,
                search_term: search,
                ..Default::default()
            };
            if let Some(column) = order_by {
                options = options.order_by(column, direction.into());
            }
            for (column, value) in conditions {
                options = options.filter(column, value);
            }
            report(
                "Company Table Record Set",
                &companies.get_table_record_set(options).await?,
            )
        }
    }
}

/// Prints a labelled envelope. Returns 1 when it carries GraphQL errors.
pub fn report<T: Serialize>(
    label: &str,
    response: &Response<T>,
) -> Result<i32, Box<dyn std::error::Error>> {
    print_envelope(label, response)?;
    Ok(i32::from(response.has_errors()))
}

pub(crate) fn print_envelope<T: Serialize>(
    label: &str,
    response: &Response<T>,
) -> Result<(), serde_json::Error> {
    println!("{}", label.green().bold());
    println!("{}", serde_json::to_string_pretty(response)?);
    for error in response.errors() {
        eprintln!("  {} {}", "-->".yellow(), error.message);
    }
    Ok(())
}
