//! quay CLI - vendor third-party packages into a project's `internal` folder

use anyhow::Result;
use clap::Parser;
use miette::{GraphicalReportHandler, GraphicalTheme};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use quay::source::ImportSyntaxError;
use quay::util::Shell;

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let json = matches!(&cli.command, Commands::List(args) if args.json);
    let global_opts = GlobalOptions {
        shell: Shell::from_flags(cli.quiet, cli.verbose, cli.color, json),
    };

    if let Err(e) = run(cli.command, &global_opts) {
        report(&global_opts.shell, &e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "quay=debug"
    } else if quiet {
        "quay=error"
    } else {
        "quay=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(command: Commands, global_opts: &GlobalOptions) -> Result<()> {
    match command {
        Commands::Init(args) => commands::init::execute(args, global_opts),
        Commands::List(args) => commands::list::execute(args, global_opts),
        Commands::Add(args) => commands::add::execute(args, global_opts),
        Commands::Update(args) => commands::update::execute(args, global_opts),
        Commands::Remove(args) => commands::remove::execute(args, global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print an error, with a source snippet when it points into a file.
fn report(shell: &Shell, err: &anyhow::Error) {
    shell.error(format!("{:#}", err));

    let Some(syntax) = err
        .chain()
        .find_map(|e| e.downcast_ref::<ImportSyntaxError>())
    else {
        return;
    };
    let theme = if shell.use_color() {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let mut out = String::new();
    if GraphicalReportHandler::new_themed(theme)
        .render_report(&mut out, syntax)
        .is_ok()
    {
        eprintln!("{}", out);
    }
}
