//! Political person CLI commands.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

use polgraph_core::person::{self, model::NewPoliticalPerson};

use crate::output;

#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add or replace a political person
    Add {
        /// Full name
        name: String,

        /// Role (president, prime_minister, minister, deputy, senator)
        #[arg(long)]
        role: Option<String>,

        /// Party or other affiliation
        #[arg(long)]
        affiliation: Option<String>,

        /// Wikipedia article URL
        #[arg(long)]
        wikipedia_url: Option<String>,

        /// Short biography
        #[arg(long)]
        summary: Option<String>,

        /// Explicit ID (replaces an existing record with the same ID)
        #[arg(long)]
        id: Option<String>,

        /// Explicit slug (derived from the name by default)
        #[arg(long)]
        slug: Option<String>,
    },

    /// List stored persons in ingestion order
    List {
        /// Only list persons with this role
        #[arg(long)]
        role: Option<String>,

        /// Maximum number of rows
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Import persons from a JSON array file
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

pub fn execute(cmd: PersonCommands, db_path: &Path) -> Result<()> {
    let pool = super::open_pool(db_path)?;

    match cmd {
        PersonCommands::Add {
            name,
            role,
            affiliation,
            wikipedia_url,
            summary,
            id,
            slug,
        } => {
            let input = NewPoliticalPerson {
                id,
                name,
                slug,
                role: super::parse_role(role.as_deref())?,
                wikipedia_url,
                summary,
                affiliation,
                updated_at: None,
            };
            let saved = person::save_person(&pool, &input, Utc::now())?;
            println!(
                "{} Saved {} {}",
                "✓".green().bold(),
                saved.name.cyan(),
                format!("({})", saved.id.as_deref().unwrap_or("-")).dimmed()
            );
            Ok(())
        }
        PersonCommands::List { role, limit } => {
            let persons = person::list_for_ingestion(&pool, super::parse_role(role.as_deref())?, limit)?;
            output::print_persons_table(&persons);
            Ok(())
        }
        PersonCommands::Import { file } => {
            let saved = person::import_persons(&pool, &file, Utc::now())
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!(
                "{} Imported {} person(s) from {}",
                "✓".green().bold(),
                saved.len(),
                file.display()
            );
            Ok(())
        }
    }
}
