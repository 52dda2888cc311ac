//! Module describing all possible commands and sub-commands to the `shelterctl` main driver
//!
//! Shelters come either from the API described in the configuration file or, with `-f`, from
//! a local JSON file in the same format.
//!
//! - `list` shows shelters, known types or cached tokens
//! - `show` displays one shelter
//! - `closest` finds the nearest shelter from a point
//! - `distance` is the raw great-circle distance between two points
//! - `edit` applies changes to a shelter and prints the result
//! - `token` gets a new API token
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, Parser, Subcommand, ValueEnum,
};
use clap_complete::shells::Shell;

use petshelter_common::Location;
use petshelter_shelters::ShelterType;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Read shelters from this JSON file instead of the API.
    #[clap(short = 'f', long)]
    pub file: Option<PathBuf>,
    /// Hierarchical logging output.
    #[clap(long)]
    pub tree: bool,
    /// Also log into hourly files in this directory.
    #[clap(long)]
    pub log_dir: Option<PathBuf>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `closest [--from lat,lon] [--all]`
/// `completion SHELL`
/// `distance lat1 lon1 lat2 lon2`
/// `edit id [--name N] [--phone P] [--type T] [--lat L --lon L]`
/// `list (shelters|types|tokens)`
/// `show id`
/// `token`
/// `version`
///
#[derive(Debug, Subcommand)]
pub enum SubCommand {
    /// Find the closest shelter
    Closest(ClosestOpts),
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Distance in km between two points
    #[command(allow_negative_numbers = true)]
    Distance(DistanceOpts),
    /// Modify a shelter and display it
    Edit(EditOpts),
    /// List shelters, types or tokens
    List(ListOpts),
    /// Display one shelter
    Show(ShowOpts),
    /// Get a new API token
    Token,
    /// List all package versions
    Version,
}

// ------

/// Options for `closest`.
///
#[derive(Debug, Parser)]
pub struct ClosestOpts {
    /// Origin as "lat,lon" (default is `home` from the config, then Madrid).
    #[clap(short = 'F', long, allow_hyphen_values = true)]
    pub from: Option<Location>,
    /// Display all shelters in range sorted by distance.
    #[clap(short = 'a', long)]
    pub all: bool,
}

// ------

/// Two points, in degrees.
///
#[derive(Debug, Parser)]
pub struct DistanceOpts {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

// ------

/// Options for `edit`, every change is optional.
///
#[derive(Debug, Parser)]
pub struct EditOpts {
    /// New name
    #[clap(short = 'n', long)]
    pub name: Option<String>,
    /// New phone number
    #[clap(short = 'p', long)]
    pub phone: Option<String>,
    /// New type
    #[clap(short = 't', long = "type")]
    pub shelter_type: Option<ShelterType>,
    /// New latitude
    #[clap(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<String>,
    /// New longitude
    #[clap(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<String>,
    /// Shelter id
    pub id: String,
}

// ------

/// Options for `show`.
///
#[derive(Debug, Parser)]
pub struct ShowOpts {
    /// Shelter id
    pub id: String,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

/// All `list` sub-commands:
///
/// `list shelters`
/// `list types`
/// `list tokens`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(value_parser)]
    pub cmd: ListSubCommand,
}

/// These are the sub-commands for `list`
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum ListSubCommand {
    /// List all shelters
    Shelters,
    /// List cached tokens
    Tokens,
    /// List shelter types
    Types,
}
