//! Batch validation pre-pass.
//!
//! Runs inside the write transaction before the first write, so a rejected
//! batch leaves the store untouched.

use std::collections::{HashMap, HashSet};

use disk_core::error::AppError;
use disk_core::result::AppResult;
use disk_core::types::UnitId;
use disk_database::store::UnitTransaction;
use disk_entity::unit::{ImportRecord, Unit, UnitKind};

use crate::navigator::cycle_at;

/// Maximum length of ids, parent ids and urls.
pub const MAX_FIELD_LEN: usize = 256;

/// Check a whole batch against itself and the current store.
///
/// Returns the stored state of every record id that already exists.
pub async fn validate_batch(
    tx: &mut dyn UnitTransaction,
    records: &[ImportRecord],
) -> AppResult<HashMap<UnitId, Unit>> {
    let mut batch: HashMap<&UnitId, &ImportRecord> = HashMap::with_capacity(records.len());
    for record in records {
        check_fields(record)?;
        if batch.insert(&record.id, record).is_some() {
            return Err(AppError::validation(format!(
                "Unit '{}' appears more than once in the batch",
                record.id
            )));
        }
    }

    let mut existing = HashMap::new();
    for record in records {
        if let Some(stored) = tx.get_unit(&record.id).await? {
            if stored.kind != record.kind {
                return Err(AppError::validation(format!(
                    "Unit '{}' is a {} and cannot become a {}",
                    record.id, stored.kind, record.kind
                )));
            }
            existing.insert(record.id.clone(), stored);
        }
    }

    for record in records {
        let Some(parent_id) = &record.parent_id else {
            continue;
        };
        let parent_kind = match batch.get(parent_id) {
            Some(parent) => Some(parent.kind),
            None => tx.get_unit(parent_id).await?.map(|u| u.kind),
        };
        match parent_kind {
            Some(UnitKind::Folder) => {}
            Some(UnitKind::File) => {
                return Err(AppError::validation(format!(
                    "Parent '{parent_id}' of unit '{}' is a file",
                    record.id
                )));
            }
            None => {
                return Err(AppError::validation(format!(
                    "Parent '{parent_id}' of unit '{}' does not exist",
                    record.id
                )));
            }
        }
    }

    for record in records {
        check_acyclic(tx, record, &batch).await?;
    }

    Ok(existing)
}

fn check_fields(record: &ImportRecord) -> AppResult<()> {
    let id = &record.id;
    if id.is_blank() {
        return Err(AppError::validation("Unit id must not be empty"));
    }
    if id.as_str().chars().count() > MAX_FIELD_LEN {
        return Err(AppError::validation(format!(
            "Unit id is longer than {MAX_FIELD_LEN} characters"
        )));
    }
    if let Some(parent_id) = &record.parent_id {
        if parent_id == id {
            return Err(AppError::validation(format!(
                "Unit '{id}' cannot be its own parent"
            )));
        }
        if parent_id.is_blank() || parent_id.as_str().chars().count() > MAX_FIELD_LEN {
            return Err(AppError::validation(format!(
                "Parent id of unit '{id}' must be 1 to {MAX_FIELD_LEN} characters"
            )));
        }
    }
    if record
        .url
        .as_ref()
        .is_some_and(|url| url.chars().count() > MAX_FIELD_LEN)
    {
        return Err(AppError::validation(format!(
            "Url of unit '{id}' is longer than {MAX_FIELD_LEN} characters"
        )));
    }

    match record.kind {
        UnitKind::Folder => {
            if record.url.is_some() {
                return Err(AppError::validation(format!(
                    "Folder '{id}' must not have a url"
                )));
            }
            if record.size.is_some() {
                return Err(AppError::validation(format!(
                    "Folder '{id}' must not have a size"
                )));
            }
        }
        UnitKind::File => {
            if record.url.is_none() {
                return Err(AppError::validation(format!("File '{id}' requires a url")));
            }
            match record.size {
                Some(size) if size >= 0 => {}
                Some(_) => {
                    return Err(AppError::validation(format!(
                        "File '{id}' has a negative size"
                    )));
                }
                None => {
                    return Err(AppError::validation(format!("File '{id}' requires a size")));
                }
            }
        }
    }

    Ok(())
}

/// Follow the parent chain of `record` as it will look after the batch is
/// applied and reject the batch if the chain returns to the record.
async fn check_acyclic(
    tx: &mut dyn UnitTransaction,
    record: &ImportRecord,
    batch: &HashMap<&UnitId, &ImportRecord>,
) -> AppResult<()> {
    let mut path = HashSet::from([record.id.clone()]);
    let mut next = record.parent_id.clone();

    while let Some(id) = next {
        if !path.insert(id.clone()) {
            if id == record.id || batch.contains_key(&id) {
                return Err(AppError::validation(format!(
                    "Unit '{}' would become its own ancestor",
                    record.id
                )));
            }
            return Err(cycle_at(&id));
        }
        next = match batch.get(&id) {
            Some(parent) => parent.parent_id.clone(),
            None => tx.get_unit(&id).await?.and_then(|u| u.parent_id),
        };
    }

    Ok(())
}
