use jailup_core::{JailRecord, JailType};

use crate::error::EligibilityError;

pub fn check_eligible(record: &JailRecord) -> Result<(), EligibilityError> {
    let uuid = record.uuid.clone();
    let tag = record.tag.clone();

    if record.has_empty_release() {
        return Err(EligibilityError::EmptyReleaseUnsupported { uuid, tag });
    }

    match &record.jail_type {
        JailType::Jail => Ok(()),
        JailType::Basejail => Err(EligibilityError::BasejailNeedsMigration { uuid, tag }),
        JailType::Template => Err(EligibilityError::TemplateNeedsConversion { uuid, tag }),
        JailType::Other(jail_type) => Err(EligibilityError::UnsupportedType {
            uuid,
            tag,
            jail_type: jail_type.clone(),
        }),
    }
}
