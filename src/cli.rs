//! Command-line surface
//!
//! Flags are applied on top of a `DirectoryConfig` that already carries the
//! defaults and the `PATIENT_*` environment layer, so a flag always wins.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DirectoryConfig;
use crate::error::Result;
use crate::loader::load_patients;
use crate::query::{RawQueryParams, process};
use crate::snapshot::RefreshPolicy;
use crate::utils::logging::format_patient_table;

/// Patient directory service
#[derive(Debug, Parser)]
#[command(name = "patient-directory", version, about)]
pub struct Cli {
    /// Patient dataset (JSON array); overrides PATIENT_DATA_PATH
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API (default)
    Serve(ServeArgs),
    /// Run one query against the dataset and print the page
    Query(QueryArgs),
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Listen address; overrides PATIENT_BIND_ADDR
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// once, always, on-change or interval:<seconds>; overrides PATIENT_REFRESH
    #[arg(long)]
    pub refresh: Option<RefreshPolicy>,

    /// Disable the CORS layer
    #[arg(long)]
    pub no_cors: bool,
}

#[derive(Debug, Default, Args)]
pub struct QueryArgs {
    #[arg(long)]
    pub page: Option<String>,
    #[arg(long)]
    pub limit: Option<String>,
    /// Case-insensitive substring of the patient name
    #[arg(long)]
    pub search: Option<String>,
    /// Exact medical issue label, case-insensitive
    #[arg(long)]
    pub medical_issue: Option<String>,
    #[arg(long)]
    pub min_age: Option<String>,
    #[arg(long)]
    pub max_age: Option<String>,
    /// patient_id, patient_name, age or medical_issue
    #[arg(long)]
    pub sort_by: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub sort_order: Option<String>,
}

impl From<QueryArgs> for RawQueryParams {
    fn from(args: QueryArgs) -> Self {
        Self {
            page: args.page,
            limit: args.limit,
            search: args.search,
            medical_issue: args.medical_issue,
            min_age: args.min_age,
            max_age: args.max_age,
            sort_by: args.sort_by,
            sort_order: args.sort_order,
        }
    }
}

impl Cli {
    /// Apply the flags to `config` and pick the command, `serve` when none was given
    pub fn resolve(self, mut config: DirectoryConfig) -> Result<(DirectoryConfig, Command)> {
        if let Some(data) = self.data {
            config.data_path = data;
        }

        let command = self
            .command
            .unwrap_or_else(|| Command::Serve(ServeArgs::default()));
        if let Command::Serve(args) = &command {
            if let Some(bind) = args.bind {
                config.bind_addr = bind;
            }
            if let Some(refresh) = args.refresh {
                config.refresh = refresh;
            }
            if args.no_cors {
                config.enable_cors = false;
            }
        }

        config.validate()?;
        Ok((config, command))
    }
}

/// Validate `raw`, load the dataset and render the requested page as a table
///
/// Parameters are checked before the dataset is read, as on the HTTP path.
pub fn run_query(config: &DirectoryConfig, raw: RawQueryParams) -> Result<String> {
    let params = raw.validate(&config.parameter_limits())?;
    let patients = load_patients(&config.data_path)?;

    let outcome = process(&patients, &params);
    Ok(format_patient_table(&outcome.patients, &outcome.pagination))
}
