use super::Parser;
use clap::{Args, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "eventboard", about = "Command-line client for the events listing API")]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the returned token pair
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and store the returned token pair
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the profile of the logged-in user
    Whoami,
    #[command(subcommand)]
    Activities(ActivitiesCommand),
    #[command(subcommand)]
    Organizers(OrganizersCommand),
    #[command(subcommand)]
    Categories(CategoriesCommand),
    /// Summary counts for the logged-in organizer
    Dashboard,
}

#[derive(Subcommand, Debug)]
pub enum ActivitiesCommand {
    List(ActivityFilterArgs),
    Show { slug: String },
    Delete { slug: String },
    Comments { slug: String },
    /// Post a comment on a published activity
    Comment { slug: String, text: String },
    Photos { slug: String },
}

#[derive(Args, Debug, Default)]
pub struct ActivityFilterArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub organizer: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub ordering: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_from: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_to: Option<String>,
    #[arg(long)]
    pub upcoming: bool,
    #[arg(long, conflicts_with = "upcoming")]
    pub past: bool,
    #[arg(long)]
    pub free: bool,
    #[arg(long, conflicts_with = "free")]
    pub paid: bool,
}

#[derive(Subcommand, Debug)]
pub enum OrganizersCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        ordering: Option<String>,
    },
    Show { slug: String },
    Activities { slug: String },
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        ordering: Option<String>,
    },
    Show { slug: String },
    Activities { slug: String },
}
