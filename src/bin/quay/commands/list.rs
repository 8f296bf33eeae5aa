//! `quay list` command

use anyhow::Result;

use crate::cli::ListArgs;
use crate::GlobalOptions;
use quay::ops::list_packages;
use quay::util::GlobalContext;

pub fn execute(args: ListArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = GlobalContext::new()?;
    let mut ws = ctx.open_workspace()?;

    let items = list_packages(&mut ws)?;

    if args.json {
        shell.print_json(&items)?;
    } else {
        for item in &items {
            shell.println(item)?;
        }
    }

    Ok(())
}
