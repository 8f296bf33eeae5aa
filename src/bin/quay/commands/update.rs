//! `quay update` command

use anyhow::Result;

use crate::cli::UpdateArgs;
use crate::GlobalOptions;
use quay::ops::update_package;

pub fn execute(args: UpdateArgs, global_opts: &GlobalOptions) -> Result<()> {
    let path = update_package(&args.import_path)?;
    global_opts.shell.warn(format!(
        "`update` is not implemented yet; {} was not updated",
        path
    ));
    Ok(())
}
