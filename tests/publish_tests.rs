//! Deck publishing pipeline tests.
//!
//! These run the whole pipeline against the in-memory stores:
//! - Happy path from draft to downloadable deck
//! - Name collisions and store outages before any upload
//! - Partial upload failure never writes a record
//! - Record write failure after all uploads

mod common;

use std::sync::Arc;
use std::time::Duration;

use memory_match::{
    fetch_deck, BoardSize, DeckDraft, DeckError, DeckPublisher, DeckRecord, GameSession, IconTable,
    MemoryBlobStore, MemoryDocumentStore, PublishConfig, PublishEvent, PublishJob, StoreError,
};
use tokio::sync::mpsc;

struct Harness {
    documents: Arc<MemoryDocumentStore>,
    blobs: Arc<MemoryBlobStore>,
    publisher: DeckPublisher,
    events: mpsc::Receiver<PublishEvent>,
}

fn harness(blobs: MemoryBlobStore) -> Harness {
    common::init_logging();
    let documents = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(blobs);
    let mut publisher = DeckPublisher::new(
        documents.clone(),
        blobs.clone(),
        Arc::new(common::HandleCodec),
        PublishConfig::default(),
    );
    let events = publisher.take_events().unwrap();
    Harness {
        documents,
        blobs,
        publisher,
        events,
    }
}

fn job(name: &str) -> PublishJob {
    let mut draft = DeckDraft::new(BoardSize::Easy, PublishConfig::default());
    draft.set_name(name);
    draft.add_images(common::photos(4));
    draft.into_job().unwrap()
}

fn drain(events: &mut mpsc::Receiver<PublishEvent>) -> Vec<PublishEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

/// A free name uploads every photo and records their URLs in order.
#[tokio::test]
async fn test_publish_free_name_records_every_image() {
    let mut h = harness(MemoryBlobStore::new("https://blobs.test"));

    let name = h.publisher.publish(job("pets")).await.unwrap();
    assert_eq!(name, "pets");

    let record = h.documents.record("games", "pets").await.unwrap();
    assert_eq!(record.images.len(), 4);

    // Each URL points at a blob holding exactly one of the input photos, in order
    for (index, url) in record.images.iter().enumerate() {
        let path = url.strip_prefix("https://blobs.test/").unwrap();
        assert!(path.starts_with("images/pets/"));
        assert!(path.ends_with(&format!("-{}.jpg", index)));
        let blob = h.blobs.blob(path).await.unwrap();
        assert_eq!(blob, format!("content://photos/{}", index).into_bytes());
    }

    let events = drain(&mut h.events);
    assert!(events.contains(&PublishEvent::Completed { name: "pets".into() }));
    let last_progress = events
        .iter()
        .filter_map(|e| match e {
            PublishEvent::Progress { fraction, .. } => Some(*fraction),
            _ => None,
        })
        .last()
        .unwrap();
    assert!((last_progress - 1.0).abs() < f64::EPSILON);
}

/// A published deck downloads back into a playable session.
#[tokio::test]
async fn test_published_deck_can_be_fetched_and_played() {
    let h = harness(MemoryBlobStore::new("https://blobs.test"));
    h.publisher.publish(job("family")).await.unwrap();

    let deck = fetch_deck(h.documents.as_ref(), &PublishConfig::default(), "family").await.unwrap();
    assert_eq!(deck.size, BoardSize::Easy);

    let game = GameSession::with_deck(deck, IconTable::default(), 4).unwrap();
    assert_eq!(game.board().cards().len(), 8);
    assert!(game
        .board()
        .cards()
        .iter()
        .all(|c| c.face.as_url().is_some_and(|u| u.starts_with("https://blobs.test/images/family/"))));
}

/// Publishing over an existing deck fails before any upload.
#[tokio::test]
async fn test_taken_name_fails_without_uploading() {
    let mut h = harness(MemoryBlobStore::new("https://blobs.test"));
    h.documents
        .insert("games", "pets", DeckRecord::new(vec!["https://old".into()]))
        .await;

    let err = h.publisher.publish(job("pets")).await.unwrap_err();
    assert_eq!(err, DeckError::NameTaken("pets".into()));
    assert_eq!(h.blobs.put_attempts(), 0);
    assert_eq!(h.documents.write_attempts(), 0);

    // The existing deck is untouched
    let record = h.documents.record("games", "pets").await.unwrap();
    assert_eq!(record.images, vec!["https://old".to_string()]);

    let events = drain(&mut h.events);
    assert!(matches!(events.last(), Some(PublishEvent::Failed { .. })));
}

/// An unreachable document store stops the job at the name check.
#[tokio::test]
async fn test_unreadable_store_fails_without_uploading() {
    let h = harness(MemoryBlobStore::new("https://blobs.test"));
    h.documents.set_fail_reads(true);

    let err = h.publisher.publish(job("pets")).await.unwrap_err();
    assert!(matches!(err, DeckError::StoreUnavailable(StoreError::Unavailable(_))));
    assert_eq!(h.blobs.put_attempts(), 0);
}

/// One rejected upload fails the job and nothing is recorded.
#[tokio::test]
async fn test_one_failed_upload_blocks_the_record() {
    let mut h = harness(MemoryBlobStore::new("https://blobs.test").with_latency(Duration::from_millis(20)));
    h.blobs.fail_paths_ending_with("-2.jpg").await;

    let err = h.publisher.publish(job("pets")).await.unwrap_err();
    assert!(matches!(err, DeckError::UploadFailed { index: 2, .. }));

    // The other three finished after the failure, but nothing was recorded
    assert_eq!(h.blobs.paths().await.len(), 3);
    assert_eq!(h.documents.write_attempts(), 0);
    assert!(h.documents.record("games", "pets").await.is_none());

    let events = drain(&mut h.events);
    let failures: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            PublishEvent::UploadFailed { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(failures, vec![2]);
    assert!(!events.iter().any(|e| matches!(e, PublishEvent::Completed { .. })));
}

/// A photo the codec cannot decode fails the job with its index.
#[tokio::test]
async fn test_undecodable_photo_fails_the_job() {
    let h = harness(MemoryBlobStore::new("https://blobs.test"));
    let mut job = job("pets");
    job.images[1] = memory_match::ImageHandle::new("content://photos/corrupt");

    let err = h.publisher.publish(job).await.unwrap_err();
    match err {
        DeckError::UploadFailed { index, reason } => {
            assert_eq!(index, 1);
            assert!(reason.contains("decode"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(h.documents.write_attempts(), 0);
}

/// A URL lookup failing after the bytes landed fails the job like any upload.
#[tokio::test]
async fn test_download_url_failure_blocks_the_record() {
    let mut h = harness(MemoryBlobStore::new("https://blobs.test"));
    h.blobs.set_fail_download_urls(true);

    let err = h.publisher.publish(job("pets")).await.unwrap_err();
    assert!(matches!(err, DeckError::UploadFailed { .. }));
    assert_eq!(h.blobs.put_attempts(), 4);
    assert_eq!(h.documents.write_attempts(), 0);
    assert!(h.documents.record("games", "pets").await.is_none());

    let events = drain(&mut h.events);
    assert!(events.iter().any(|e| matches!(e, PublishEvent::UploadFailed { .. })));
    assert!(!events.iter().any(|e| matches!(e, PublishEvent::Completed { .. })));
}

/// Jobs built by hand still go through name validation.
#[tokio::test]
async fn test_blank_name_is_rejected_before_name_check() {
    let h = harness(MemoryBlobStore::new("https://blobs.test"));
    let job = PublishJob {
        name: "  ".to_string(),
        size: BoardSize::Easy,
        images: common::photos(4),
    };

    let err = h.publisher.publish(job).await.unwrap_err();
    assert_eq!(err, DeckError::InvalidName("  ".into()));
    assert_eq!(h.blobs.put_attempts(), 0);
    assert_eq!(h.documents.write_attempts(), 0);
}

/// A failed record write after all uploads is reported as such.
#[tokio::test]
async fn test_record_write_failure_is_terminal() {
    let h = harness(MemoryBlobStore::new("https://blobs.test"));
    h.documents.set_fail_writes(true);

    let err = h.publisher.publish(job("pets")).await.unwrap_err();
    assert!(matches!(err, DeckError::RecordWriteFailed(_)));
    assert_eq!(h.documents.write_attempts(), 1);

    // Uploaded blobs are left in place
    assert_eq!(h.blobs.paths().await.len(), 4);
}

/// Completions racing on many threads still record the deck exactly once.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_completions_record_exactly_once() {
    let h = harness(MemoryBlobStore::new("https://blobs.test").with_latency(Duration::from_millis(5)));

    let mut draft = DeckDraft::new(BoardSize::Hard, PublishConfig::default());
    draft.set_name("big deck");
    draft.add_images(common::photos(12));

    h.publisher.publish(draft.into_job().unwrap()).await.unwrap();
    assert_eq!(h.documents.write_attempts(), 1);
    assert_eq!(h.documents.record("games", "big deck").await.unwrap().images.len(), 12);
}
