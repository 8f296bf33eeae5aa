//! `quay remove` command

use anyhow::Result;

use crate::cli::RemoveArgs;
use crate::GlobalOptions;
use quay::ops::remove_package;

pub fn execute(args: RemoveArgs, global_opts: &GlobalOptions) -> Result<()> {
    let path = remove_package(&args.import_path)?;
    global_opts.shell.warn(format!(
        "`remove` is not implemented yet; {} was not removed",
        path
    ));
    Ok(())
}
