//! Implementation of the `pdm show` command.

use crate::cli::ShowArgs;
use pdm::error::Result;
use pdm::service::{FileStatus, PdmService};

/// Execute the `pdm show` command.
pub fn cmd_show(service: &PdmService, args: ShowArgs) -> Result<()> {
    let status = service.file_info(&args.filename)?;

    if args.json {
        let json = serde_json::to_string_pretty(&status)?;
        println!("{}", json);
    } else {
        print!("{}", render_status(&status));
    }

    Ok(())
}

/// Render a single file's status as labeled lines.
pub fn render_status(status: &FileStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!("File:       {}\n", status.name));
    out.push_str(&format!("Status:     {}\n", status.status));
    out.push_str(&format!("Size:       {} bytes\n", status.size_bytes));
    out.push_str(&format!(
        "Modified:   {}\n",
        status.modified.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if let Some(owner) = &status.locked_by {
        out.push_str(&format!("Locked by:  {}\n", owner));
    }
    if let Some(locked_at) = status.locked_at {
        out.push_str(&format!(
            "Since:      {}\n",
            locked_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    if let Some(message) = &status.lock_message {
        out.push_str(&format!("Message:    {}\n", message));
    }

    out
}
