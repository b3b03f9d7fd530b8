use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use tableland_sqlparser::{
    get_unique_table_names, max_query_size, normalize, structure_hash, update_table_names,
    validate_statement, validate_table_name,
};

#[derive(Parser)]
#[command(name = "sqlnorm")]
#[command(author, version, about = "Validate and normalize restricted-dialect SQL statements")]
struct Cli {
    /// Override the maximum statement size in bytes (0 disables the check)
    #[arg(long, global = true)]
    max_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement batch and print its canonical form
    Normalize {
        statement: String,

        /// Also print the batch kind (create, read, write, acl)
        #[arg(short, long)]
        kind: bool,
    },

    /// Normalize and check every table reference against the naming convention
    Validate { statement: String },

    /// Print the distinct table names referenced by a batch
    Tables { statement: String },

    /// Check a bare table name against the naming convention
    Name {
        name: String,

        /// Treat the name as a CREATE-form name (no table id)
        #[arg(short, long)]
        create: bool,
    },

    /// Print the structural fingerprint of a CREATE TABLE statement
    Hash { statement: String },

    /// Rewrite table references and print the updated statement
    Rewrite {
        statement: String,

        /// Rename mappings, `old=new`, repeatable
        #[arg(short, long = "map", value_name = "OLD=NEW", required = true)]
        mappings: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(size) = cli.max_size {
        max_query_size(Some(size));
    }

    match cli.command {
        Commands::Normalize { statement, kind } => {
            let batch = normalize(&statement)?;
            if kind {
                println!("{}", batch.kind.as_str());
            }
            println!("{}", batch.joined());
        }
        Commands::Validate { statement } => {
            println!("{}", validate_statement(&statement)?);
        }
        Commands::Tables { statement } => {
            for name in get_unique_table_names(&statement)? {
                println!("{name}");
            }
        }
        Commands::Name { name, create } => {
            let parsed = validate_table_name(&name, create)?;
            match parsed.table_id() {
                Some(id) => println!(
                    "prefix={} chain_id={} table_id={}",
                    parsed.prefix(),
                    parsed.chain_id(),
                    id
                ),
                None => println!("prefix={} chain_id={}", parsed.prefix(), parsed.chain_id()),
            }
        }
        Commands::Hash { statement } => {
            println!("{}", structure_hash(&statement)?);
        }
        Commands::Rewrite {
            statement,
            mappings,
        } => {
            let mut mapping = std::collections::HashMap::new();
            for entry in &mappings {
                let Some((old, new)) = entry.split_once('=') else {
                    bail!("invalid mapping '{entry}', expected OLD=NEW");
                };
                mapping.insert(old.to_string(), new.to_string());
            }
            println!("{}", update_table_names(&statement, &mapping)?);
        }
    }

    Ok(())
}
