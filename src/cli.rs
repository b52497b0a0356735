use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "job-board", about = "Job board HTTP service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run migrations, then serve HTTP (the default)
    Serve(ServeArgs),
    /// Apply pending database migrations and exit
    Migrate,
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind address, overrides HOST
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overrides PORT
    #[arg(long)]
    pub port: Option<u16>,

    /// Use the in-process store instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,
}

impl Cli {
    /// The serve arguments, with `serve` implied when no subcommand is given
    pub fn command(self) -> Command {
        self.command.unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    }
}
