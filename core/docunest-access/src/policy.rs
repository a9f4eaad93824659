//! The decision table, free of I/O.

use crate::decision::{Denial, Operation};
use crate::identity::Caller;
use docunest_model::{DocumentRecord, PasswordProtection};

/// Evaluates whether `caller` may perform `operation` on `record`.
///
/// `verify(candidate, token)` is only invoked for a non-owner's download of a
/// public, protected document with a non-empty supplied password.
pub(crate) fn evaluate(
    record: &DocumentRecord,
    caller: &Caller,
    operation: Operation,
    supplied_password: Option<&str>,
    verify: impl FnOnce(&str, &str) -> bool,
) -> Result<(), Denial> {
    if caller.owns(record) {
        return Ok(());
    }
    if !record.is_public() {
        return Err(Denial::NotFound);
    }

    match (operation, &record.password_protection) {
        (Operation::Metadata | Operation::View, _) => Ok(()),
        (Operation::Download, PasswordProtection::Absent) => Ok(()),
        (Operation::Download, PasswordProtection::Enabled(token)) => {
            match supplied_password.filter(|p| !p.is_empty()) {
                None => Err(Denial::PasswordRequired),
                Some(candidate) if verify(candidate, token) => Ok(()),
                Some(_) => Err(Denial::InvalidPassword),
            }
        }
    }
}
