pub mod change_password;
pub mod config;
pub mod directory;
pub mod login;
pub mod policy;
pub mod register;

use crate::error::IdentityResult;

/// Collapse expected rejections into `Ok(false)`. State corruption and
/// infrastructure failures pass through untouched.
pub(crate) fn flow_outcome(result: IdentityResult<bool>) -> IdentityResult<bool> {
    match result {
        Err(err) if err.is_flow_rejection() => {
            err.log();
            Ok(false)
        }
        other => other,
    }
}
