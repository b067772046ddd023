use std::sync::Arc;
use std::time::Duration;

use crate::utils::{DatasetFixture, sample_patients};
use patient_directory::{DatasetStore, DirectoryError, PatientRecord, RefreshPolicy};

fn two_patients() -> Vec<PatientRecord> {
    vec![
        PatientRecord::new(1, "Ann", 30, "fever"),
        PatientRecord::new(2, "Bob", 40, "rash"),
    ]
}

/// Test the default policy keeps serving the first load
#[tokio::test]
async fn test_once_never_reloads() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&sample_patients());
    let store = DatasetStore::open(fixture.path(), RefreshPolicy::Once).await?;
    let first = store.current().await?;

    fixture.rewrite(&two_patients());
    fixture.bump_modified(Duration::from_secs(10));

    let second = store.current().await?;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 12);
    Ok(())
}

#[tokio::test]
async fn test_always_reloads_every_request() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&sample_patients());
    let store = DatasetStore::open(fixture.path(), RefreshPolicy::Always).await?;
    assert_eq!(store.current().await?.len(), 12);

    fixture.rewrite(&two_patients());
    assert_eq!(store.current().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_on_change_reloads_only_after_modification() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&sample_patients());
    let store = DatasetStore::open(fixture.path(), RefreshPolicy::OnChange).await?;

    let first = store.current().await?;
    let unchanged = store.current().await?;
    assert!(Arc::ptr_eq(&first, &unchanged));

    fixture.rewrite(&two_patients());
    fixture.bump_modified(Duration::from_secs(10));

    let reloaded = store.current().await?;
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(reloaded.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_interval_reloads_after_expiry() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&sample_patients());
    let store = DatasetStore::open(fixture.path(), RefreshPolicy::Interval(Duration::from_secs(1)))
        .await?;

    fixture.rewrite(&two_patients());
    assert_eq!(store.current().await?.len(), 12);

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(store.current().await?.len(), 2);
    Ok(())
}

/// Test a broken reload reports the error and keeps the last good snapshot
#[tokio::test]
async fn test_failed_reload_keeps_previous_snapshot() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&sample_patients());
    let store = DatasetStore::open(fixture.path(), RefreshPolicy::Always).await?;

    fixture.rewrite_raw("not json");
    let err = store.current().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Parse { .. }), "got {err:?}");

    let kept = store.peek().await.expect("previous snapshot should remain");
    assert_eq!(kept.len(), 12);

    fixture.rewrite(&two_patients());
    assert_eq!(store.current().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_lazy_store_loads_on_first_use() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&sample_patients());
    let store = DatasetStore::new(fixture.path(), RefreshPolicy::Once);
    assert!(store.peek().await.is_none());

    assert_eq!(store.current().await?.len(), 12);
    assert!(store.peek().await.is_some());
    Ok(())
}

#[tokio::test]
async fn test_open_fails_for_missing_file() {
    let fixture = DatasetFixture::new(&[]);
    let missing = fixture.path().with_file_name("nowhere.json");

    let err = DatasetStore::open(missing, RefreshPolicy::Once)
        .await
        .unwrap_err();
    assert!(err.is_dataset_failure());
}

/// Test concurrent readers share one snapshot
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_share_snapshot() -> patient_directory::Result<()> {
    let fixture = DatasetFixture::new(&sample_patients());
    let store = Arc::new(DatasetStore::open(fixture.path(), RefreshPolicy::Once).await?);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.current().await })
        })
        .collect();

    let first = store.current().await?;
    for handle in handles {
        let snapshot = handle.await.expect("task panicked")?;
        assert!(Arc::ptr_eq(&first, &snapshot));
    }
    Ok(())
}
