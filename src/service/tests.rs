//! Tests for the checkout/checkin service.

use super::*;
use crate::error::PdmError;
use crate::repository::FileRepository;
use crate::store::LockStore;
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

/// Create a repository seeded with the given files plus an empty lock store.
fn create_test_service(files: &[&str]) -> (TempDir, PdmService) {
    let temp_dir = TempDir::new().unwrap();
    let repository = FileRepository::open(temp_dir.path().join("repo"), ["mcam"]).unwrap();
    for name in files {
        std::fs::write(repository.root().join(name), format!("contents of {name}")).unwrap();
    }
    let store = LockStore::open(temp_dir.path().join("locks.json")).unwrap();

    (temp_dir, PdmService::new(store, repository))
}

#[test]
fn test_checkout_checkin_scenario() {
    let (_temp_dir, service) = create_test_service(&["4806148.mcam", "4200124.mcam"]);

    let record = service
        .checkout("4806148.mcam", "mmclean", "edit gear")
        .unwrap();
    assert_eq!(record.owner, "mmclean");
    assert_eq!(record.message, "edit gear");

    let err = service
        .checkout("4806148.mcam", "jdoe", "also editing")
        .unwrap_err();
    assert!(matches!(err, PdmError::AlreadyLocked { ref owner, .. } if owner == "mmclean"));

    let err = service.checkin("4806148.mcam", "jdoe").unwrap_err();
    assert!(matches!(err, PdmError::NotOwner { ref owner, .. } if owner == "mmclean"));

    service.checkin("4806148.mcam", "mmclean").unwrap();

    let info = service.file_info("4806148.mcam").unwrap();
    assert_eq!(info.status, FileState::Available);
    assert_eq!(info.locked_by, None);
}

#[test]
fn test_checkout_missing_file() {
    let (_temp_dir, service) = create_test_service(&["4806148.mcam"]);

    let err = service
        .checkout("9999999.mcam", "mmclean", "edit")
        .unwrap_err();
    assert!(matches!(err, PdmError::FileNotFound(ref f) if f == "9999999.mcam"));
    assert!(service.store().load().is_empty());
}

#[test]
fn test_checkout_disallowed_extension_is_not_found() {
    let (_temp_dir, service) = create_test_service(&[]);
    std::fs::write(service.repository().root().join("notes.txt"), "x").unwrap();

    let err = service.checkout("notes.txt", "mmclean", "edit").unwrap_err();
    assert!(matches!(err, PdmError::FileNotFound(_)));
}

#[test]
fn test_checkout_requires_exact_spelling() {
    let (_temp_dir, service) = create_test_service(&["4806148.mcam"]);

    let err = service
        .checkout("4806148.MCAM", "mmclean", "edit")
        .unwrap_err();
    assert!(matches!(err, PdmError::FileNotFound(_)));
    assert!(service.store().load().is_empty());
}

#[test]
fn test_checkout_validation() {
    let (_temp_dir, service) = create_test_service(&["a.mcam"]);

    let cases = [
        ("", "mmclean", "edit"),
        ("a.mcam", "ab", "edit"),
        ("a.mcam", "mmclean", ""),
        ("a.mcam", "mmclean", "   "),
    ];
    for (filename, user, message) in cases {
        let err = service.checkout(filename, user, message).unwrap_err();
        assert!(
            matches!(err, PdmError::InvalidRequest(_)),
            "expected InvalidRequest for {:?}",
            (filename, user, message)
        );
    }

    let too_long = "x".repeat(MAX_MESSAGE_LEN + 1);
    assert!(matches!(
        service.checkout("a.mcam", "mmclean", &too_long),
        Err(PdmError::InvalidRequest(_))
    ));

    let longest = "é".repeat(MAX_MESSAGE_LEN);
    service.checkout("a.mcam", "mmclean", &longest).unwrap();
}

#[test]
fn test_checkin_not_locked() {
    let (_temp_dir, service) = create_test_service(&["a.mcam"]);

    let err = service.checkin("a.mcam", "mmclean").unwrap_err();
    assert!(matches!(err, PdmError::NotLocked(_)));
}

#[test]
fn test_force_checkin() {
    let (_temp_dir, service) = create_test_service(&["a.mcam"]);
    service.checkout("a.mcam", "mmclean", "edit").unwrap();

    let removed = service.force_checkin("a.mcam").unwrap();
    assert_eq!(removed.owner, "mmclean");
    assert!(matches!(
        service.force_checkin("a.mcam"),
        Err(PdmError::NotLocked(_))
    ));
}

#[test]
fn test_list_with_status() {
    let (_temp_dir, service) =
        create_test_service(&["4806148.mcam", "4200124.mcam", "4604524.mcam"]);
    std::fs::write(service.repository().root().join("readme.txt"), "x").unwrap();
    service
        .checkout("4806148.mcam", "mmclean", "edit gear")
        .unwrap();

    let files = service.list_with_status().unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["4200124.mcam", "4604524.mcam", "4806148.mcam"]);

    let locked = &files[2];
    assert_eq!(locked.status, FileState::CheckedOut);
    assert_eq!(locked.locked_by.as_deref(), Some("mmclean"));
    assert_eq!(locked.lock_message.as_deref(), Some("edit gear"));
    assert!(locked.locked_at.is_some());
    assert_eq!(locked.size_bytes, "contents of 4806148.mcam".len() as u64);

    assert!(files[..2].iter().all(|f| f.status == FileState::Available));
}

#[test]
fn test_list_ignores_locks_for_files_not_in_repository() {
    let (_temp_dir, service) = create_test_service(&["a.mcam"]);
    service.store().acquire("ghost.mcam", "mmclean", "edit").unwrap();

    let files = service.list_with_status().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].status, FileState::Available);
}

#[test]
fn test_file_info_missing() {
    let (_temp_dir, service) = create_test_service(&[]);
    assert!(matches!(
        service.file_info("NONEXISTENT.mcam"),
        Err(PdmError::FileNotFound(_))
    ));
}

#[test]
fn test_file_status_json_shape() {
    let (_temp_dir, service) = create_test_service(&["a.mcam", "b.mcam"]);
    service.checkout("a.mcam", "mmclean", "edit").unwrap();

    let files = service.list_with_status().unwrap();
    let json = serde_json::to_value(&files).unwrap();

    assert_eq!(json[0]["status"], "checked_out");
    assert_eq!(json[0]["locked_by"], "mmclean");
    assert_eq!(json[1]["status"], "available");
    assert!(json[1].get("locked_by").is_none());
}

#[test]
fn test_file_status_display() {
    let (_temp_dir, service) = create_test_service(&["a.mcam"]);
    assert_eq!(
        service.file_info("a.mcam").unwrap().to_string(),
        "a.mcam (available)"
    );

    service.checkout("a.mcam", "mmclean", "edit").unwrap();
    assert_eq!(
        service.file_info("a.mcam").unwrap().to_string(),
        "a.mcam (checked_out by mmclean)"
    );
}

#[test]
fn test_concurrent_checkout_single_winner() {
    const WORKERS: usize = 6;
    let (_temp_dir, service) = create_test_service(&["4806148.mcam"]);
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|i| {
            let service = service.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.checkout("4806148.mcam", &format!("user{i}"), "race")
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(PdmError::AlreadyLocked { .. })))
            .count(),
        WORKERS - 1
    );
}
