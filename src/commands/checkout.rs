//! Implementations of the `pdm checkout`, `pdm checkin` and `pdm unlock` commands.

use super::resolve_user;
use crate::cli::{CheckinArgs, CheckoutArgs, UnlockArgs};
use pdm::error::{PdmError, Result};
use pdm::service::PdmService;

/// Execute the `pdm checkout` command.
pub fn cmd_checkout(service: &PdmService, args: CheckoutArgs) -> Result<()> {
    let user = resolve_user(args.user)?;
    let record = service.checkout(&args.filename, &user, &args.message)?;

    println!(
        "Checked out {} to {} at {}",
        args.filename,
        record.owner,
        record.acquired_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}

/// Execute the `pdm checkin` command.
pub fn cmd_checkin(service: &PdmService, args: CheckinArgs) -> Result<()> {
    let user = resolve_user(args.user)?;
    let record = service.checkin(&args.filename, &user)?;

    println!(
        "Checked in {} (held by {} for {})",
        args.filename,
        record.owner,
        record.age_string()
    );
    Ok(())
}

/// Execute the `pdm unlock` command.
pub fn cmd_unlock(service: &PdmService, args: UnlockArgs) -> Result<()> {
    if !args.force {
        return Err(PdmError::InvalidRequest(format!(
            "unlocking '{}' discards another user's checkout; re-run with --force",
            args.filename
        )));
    }

    let record = service.force_checkin(&args.filename)?;
    println!(
        "Cleared checkout of {} (was held by {}: {})",
        args.filename, record.owner, record.message
    );
    Ok(())
}
