//! CLI argument definitions using the clap derive API.
//!
//! This module is the only place that knows about argument names, aliases,
//! help text and value enums. No catalog logic lives here.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use formkit_adapters::BookCategory;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "formkit",
    bin_name = "formkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validated, observable form fields on a sample book catalog",
    long_about = "formkit edits a sample book catalog through validated fields. \
                  Every edit runs the field's filter, validator and change \
                  events; commits are only allowed while nothing is in error.",
    after_help = "EXAMPLES:\n\
        \x20 formkit list --category comic\n\
        \x20 formkit edit 3 --set Price=650 --set ReviewPoint=5 --commit\n\
        \x20 formkit add --set Title=Sanshiro --set Author=\"Natsume Soseki\" ...\n\
        \x20 formkit report --page-lines 5",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the books in the catalog.
    #[command(
        visible_alias = "ls",
        about = "List books",
        after_help = "EXAMPLES:\n\
            \x20 formkit list\n\
            \x20 formkit list --category novel --format csv"
    )]
    List(ListArgs),

    /// Show every field of one book with its description.
    #[command(about = "Show one book")]
    Show(ShowArgs),

    /// Assign field values on a book and optionally commit them.
    #[command(
        visible_alias = "e",
        about = "Edit a book",
        after_help = "EXAMPLES:\n\
            \x20 formkit edit 2 --set Price=900\n\
            \x20 formkit edit 2 --set Price=900 --set PurchaseDate=2015-03-01 --commit"
    )]
    Edit(EditArgs),

    /// Validate a new book and add it to the catalog.
    #[command(about = "Add a book")]
    Add(AddArgs),

    /// Render the paginated book list.
    #[command(
        about = "Render the book list report",
        after_help = "EXAMPLES:\n\
            \x20 formkit report\n\
            \x20 formkit report --title \"My Library\" --page-lines 5 -o books.txt"
    )]
    Report(ReportArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 formkit init           # user config directory\n\
            \x20 formkit init --local   # ./formkit.toml"
    )]
    Init(InitArgs),

    #[command(about = "Generate shell completions")]
    Completions(CompletionsArgs),

    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 formkit config get report.page_lines\n\
            \x20 formkit config list"
    )]
    Config(ConfigCommands),
}

// ── list / show ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long = "category", value_enum, help = "Only list books in this category")]
    pub category: Option<CategoryArg>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Aligned columns.
    Table,
    /// One "title - author" per line.
    List,
    Json,
    Csv,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_name = "ID", help = "Book id")]
    pub id: u32,
}

// ── edit / add ────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(value_name = "ID", help = "Book id")]
    pub id: u32,

    #[arg(
        short = 's',
        long = "set",
        value_name = "FIELD=VALUE",
        value_parser = parse_assignment,
        required = true,
        help = "Assign a field; repeatable. An empty value clears the field"
    )]
    pub assignments: Vec<Assignment>,

    /// Commit when the book is changed and error-free. Without this flag the
    /// edits are shown and then discarded.
    #[arg(long = "commit", help = "Commit the edits")]
    pub commit: bool,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(
        short = 's',
        long = "set",
        value_name = "FIELD=VALUE",
        value_parser = parse_assignment,
        required = true,
        help = "Assign a field; repeatable"
    )]
    pub assignments: Vec<Assignment>,
}

/// One `FIELD=VALUE` pair from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub field: String,
    pub value: String,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok(Assignment {
        field: field.to_owned(),
        value: value.to_owned(),
    })
}

// ── report ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(long = "title", help = "Report title (overrides report.title)")]
    pub title: Option<String>,

    #[arg(
        long = "page-lines",
        value_parser = parse_page_lines,
        help = "Rows per page (overrides report.page_lines)"
    )]
    pub page_lines: Option<usize>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the report to FILE instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

fn parse_page_lines(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("a page needs at least one row".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

// ── init / completions / config ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long = "local", help = "Create ./formkit.toml instead")]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `report.title`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CategoryArg {
    Novel,
    Nonfiction,
    Comic,
}

impl From<CategoryArg> for BookCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Novel => Self::Novel,
            CategoryArg::Nonfiction => Self::Nonfiction,
            CategoryArg::Comic => Self::Comic,
        }
    }
}
