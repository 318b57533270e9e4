use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Pending,
    Completed,
}

impl From<StatusArg> for taskdesk_core::api::TaskStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => Self::Pending,
            StatusArg::Completed => Self::Completed,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "taskdesk", version, about = "Local-first task list backed by a remote feed")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep everything in memory for this run; nothing is read from or written to disk.
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Override the remote base URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ListArgs {
    /// Free-text search across the table's search keys.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// all, pending or completed.
    #[arg(long, default_value = "all")]
    pub status: String,

    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Rows per page; must be one of the configured page sizes.
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Skip merging the remote list into the store before listing.
    #[arg(long)]
    pub offline: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    /// Task description.
    #[arg(long, default_value = "")]
    pub body: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StatusArgs {
    pub id: i64,

    #[arg(value_enum)]
    pub status: StatusArg,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EditArgs {
    pub id: i64,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub body: String,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IdArgs {
    pub id: i64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of the task table.
    List(ListArgs),
    /// Create a task.
    Add(AddArgs),
    /// Change only the status of a task.
    Status(StatusArgs),
    /// Replace a task's title, description and optionally status.
    Edit(EditArgs),
    /// Delete a task.
    Rm(IdArgs),
    /// Show a task with its remote comments.
    Show(IdArgs),
    /// Fetch the remote list and add tasks not yet known locally.
    Sync,
    /// Fetch the remote list and let it replace local state.
    Reload,
    /// Remove every task.
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let args = Args::parse_from([
            "taskdesk", "list", "--search", "qui", "--status", "pending", "-p", "2", "--per-page",
            "5",
        ]);
        let Commands::List(list) = args.command else {
            panic!("expected list");
        };
        assert_eq!(list.search.as_deref(), Some("qui"));
        assert_eq!(list.status, "pending");
        assert_eq!(list.page, 2);
        assert_eq!(list.per_page, Some(5));
    }

    #[test]
    fn test_parse_status() {
        let args = Args::parse_from(["taskdesk", "--in-memory", "status", "3", "completed"]);
        assert!(args.in_memory);
        assert!(matches!(
            args.command,
            Commands::Status(StatusArgs {
                id: 3,
                status: StatusArg::Completed
            })
        ));
    }
}
