use jailup_core::JailEntry;

use crate::types::ResolveError;

pub fn resolve_jail(identifier: &str, jails: &[JailEntry]) -> Result<JailEntry, ResolveError> {
    if identifier.trim().is_empty() {
        return Err(ResolveError::EmptyIdentifier);
    }

    let mut matches = jails
        .iter()
        .filter(|jail| matches_identifier(jail, identifier))
        .cloned()
        .collect::<Vec<_>>();

    match matches.len() {
        0 => Err(ResolveError::NotFound {
            identifier: identifier.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => {
            matches.sort_by(|left, right| {
                left.tag
                    .cmp(&right.tag)
                    .then_with(|| left.uuid.cmp(&right.uuid))
            });
            Err(ResolveError::Ambiguous {
                identifier: identifier.to_string(),
                conflicts: matches,
            })
        }
    }
}

pub(crate) fn matches_identifier(jail: &JailEntry, identifier: &str) -> bool {
    jail.uuid.starts_with(identifier) || jail.tag == identifier
}
