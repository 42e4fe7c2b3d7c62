//! Command-line surface.
//!
//! One optional positional argument: the AWS credential profile to use.
//! Anything beyond that is a usage error and clap rejects it with usage
//! text and a non-zero exit.

use clap::Parser;

/// ElastiCache cluster inventory reporter
#[derive(Parser, Debug)]
#[command(name = "elastic-cluster-info")]
#[command(
    version,
    about = "Inventory ElastiCache clusters and compare engine versions"
)]
#[command(long_about = "
Inventory ElastiCache clusters and compare engine versions

Enumerates every cache cluster in the account/region, resolves the latest
available engine version per engine family (redis, memcached), collapses
replication groups to a single logical entry, and writes <region>.csv in
the working directory.

EXAMPLES:
    # Use the default AWS profile from ~/.aws/*
    elastic-cluster-info

    # Use a named credential profile
    elastic-cluster-info staging

    # Verbose logging (repeat for more detail)
    elastic-cluster-info -vv staging
")]
pub struct Cli {
    /// AWS credential profile stored in ~/.aws/* (omit to use the default profile)
    #[arg(value_name = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
