//! Implementation of the `pdm list` command.

use crate::cli::ListArgs;
use pdm::error::Result;
use pdm::service::{FileStatus, PdmService};

/// Execute the `pdm list` command.
pub fn cmd_list(service: &PdmService, args: ListArgs) -> Result<()> {
    let files = service.list_with_status()?;

    if args.json {
        let json = serde_json::to_string_pretty(&files)?;
        println!("{}", json);
    } else {
        print!("{}", render_table(&files));
    }

    Ok(())
}

/// Render files as an aligned text table.
pub fn render_table(files: &[FileStatus]) -> String {
    if files.is_empty() {
        return "No files in repository.\n".to_string();
    }

    let name_width = files
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!(
        "{:<name_width$}  {:<11}  {:>12}  {}\n",
        "NAME", "STATUS", "SIZE", "LOCKED BY"
    );
    for file in files {
        out.push_str(&format!(
            "{:<name_width$}  {:<11}  {:>12}  {}\n",
            file.name,
            file.status.as_str(),
            file.size_bytes,
            file.locked_by.as_deref().unwrap_or("-")
        ));
    }

    let checked_out = files.iter().filter(|f| f.locked_by.is_some()).count();
    out.push_str(&format!(
        "\n{} file(s), {} checked out\n",
        files.len(),
        checked_out
    ));
    out
}
