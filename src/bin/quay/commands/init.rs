//! `quay init` command

use anyhow::Result;

use crate::cli::InitArgs;
use crate::GlobalOptions;
use quay::ops::init_project;
use quay::util::{GlobalContext, Status};

pub fn execute(args: InitArgs, global_opts: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let dir = match args.path {
        Some(path) if path.is_absolute() => path,
        Some(path) => ctx.cwd().join(path),
        None => ctx.cwd().to_path_buf(),
    };

    let manifest_path = init_project(&dir)?;
    global_opts.shell.status(
        Status::Created,
        format!("vendor manifest `{}`", manifest_path.display()),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse_init_args(args: &[&str]) -> InitArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            init: InitArgs,
        }
        TestCli::parse_from(args).init
    }

    #[test]
    fn test_init_args_defaults() {
        let args = parse_init_args(&["test"]);
        assert!(args.path.is_none());
    }

    #[test]
    fn test_init_with_path() {
        let args = parse_init_args(&["test", "../project"]);
        assert_eq!(args.path, Some(PathBuf::from("../project")));
    }
}
