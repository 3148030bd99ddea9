use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blog-server")]
#[command(about = "Blog Server CLI")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run database migrations
    Migrate,
    /// Run the startup seed in the foreground and exit
    Seed,
}

#[derive(Debug, Clone)]
pub enum RunMode {
    Server,
    Migrate,
    Seed,
}

pub fn parse_args() -> RunMode {
    let cli = Cli::parse();
    match cli.command {
        None => RunMode::Server,
        Some(Command::Migrate) => RunMode::Migrate,
        Some(Command::Seed) => RunMode::Seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_command_is_server() {
        let cli = Cli::parse_from(["blog-server"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_migrate_command() {
        let cli = Cli::parse_from(["blog-server", "migrate"]);
        assert!(matches!(cli.command, Some(Command::Migrate)));
    }

    #[test]
    fn parse_seed_command() {
        let cli = Cli::parse_from(["blog-server", "seed"]);
        assert!(matches!(cli.command, Some(Command::Seed)));
    }

    #[test]
    fn parse_unknown_command_fails() {
        assert!(Cli::try_parse_from(["blog-server", "openapi"]).is_err());
    }
}
