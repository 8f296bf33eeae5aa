//! `quay add` command

use anyhow::Result;

use crate::cli::AddArgs;
use crate::GlobalOptions;
use quay::ops::add_package;
use quay::util::fs::relative_path;
use quay::util::{GlobalContext, Status};

pub fn execute(args: AddArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = GlobalContext::new()?;
    let mut ws = ctx.open_workspace()?;

    let result = add_package(&mut ws, &args.import_path)?;
    let root = ws.root_dir();

    shell.status(
        Status::Copied,
        format!(
            "{} files to `{}`",
            result.files_copied,
            relative_path(root, &result.dest_dir).display()
        ),
    );
    for file in &result.rewritten {
        shell.verbose_status(Status::Rewrote, relative_path(root, file).display());
    }
    shell.status(
        Status::Rewrote,
        format!("imports in {} files", result.rewritten.len()),
    );
    shell.status(
        Status::Added,
        format!("{} as {}", result.vendor_path, result.local_path),
    );

    Ok(())
}
