use starlist::core::assembler::{Assembler, RateLimitKind};
use starlist::core::cache::{load_catalog, CacheSlot, MemorySlot};
use starlist::core::diagnostics::Diagnostics;
use starlist::core::error::StarlistError;
use starlist::core::upstream::ViewerPage;
use std::time::Duration;

mod common;
use common::fixtures::*;

#[cfg(test)]
mod assembler_tests {
    use super::*;

    fn assembler(client: &mut FakeClient) -> Assembler<&mut FakeClient, RecordingBackoff> {
        Assembler::new(client).with_backoff(RecordingBackoff::default())
    }

    #[test]
    fn test_four_primary_signals_exhaust_retries() {
        let mut client = FakeClient::new(vec![
            primary_limit(),
            primary_limit(),
            primary_limit(),
            primary_limit(),
        ]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();

        let mut assembler = assembler(&mut client);
        let err = assembler
            .assemble(&mut slot, &mut diagnostics)
            .unwrap_err();
        assert_eq!(assembler.backoff().delays.len(), 3);

        assert!(matches!(
            err,
            StarlistError::RetriesExhausted {
                kind: RateLimitKind::Primary,
                retries: 3
            }
        ));
        assert_eq!(client.calls(), 4);
        assert_eq!(diagnostics.warning_count(), 4);
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics
            .warnings()
            .all(|w| w.message == "Request quota exhausted for star retrieval"));
        assert_eq!(
            diagnostics.errors().next().unwrap().message,
            "Primary request retries exhausted"
        );
        assert_eq!(slot.writes(), 0);
    }

    #[test]
    fn test_two_secondary_signals_then_success() {
        let mut client = FakeClient::new(vec![
            secondary_limit(),
            secondary_limit(),
            page(vec![repo("rust-lang/rust", "Rust", &["compiler"])], 1, None),
        ]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();

        let mut assembler = assembler(&mut client);
        let catalog = assembler.assemble(&mut slot, &mut diagnostics).unwrap();
        assert_eq!(
            assembler.backoff().delays,
            vec![Duration::from_secs(60), Duration::from_secs(60)]
        );

        assert_eq!(catalog.stars.len(), 1);
        assert_eq!(diagnostics.warning_count(), 2);
        assert_eq!(diagnostics.error_count(), 0);
        assert!(diagnostics
            .warnings()
            .all(|w| w.message == "Secondary rate limit detected for star retrieval"));
    }

    #[test]
    fn test_two_primary_signals_then_success() {
        let mut client = FakeClient::new(vec![
            primary_limit(),
            primary_limit(),
            page(vec![repo("rust-lang/cargo", "Rust", &[])], 1, None),
        ]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();

        let mut assembler = assembler(&mut client);
        let catalog = assembler.assemble(&mut slot, &mut diagnostics).unwrap();
        assert_eq!(
            assembler.backoff().delays,
            vec![Duration::from_secs(5), Duration::from_secs(5)]
        );

        assert_eq!(catalog.stars.len(), 1);
        assert_eq!(client.calls(), 3);
        assert_eq!(diagnostics.warning_count(), 2);
        assert_eq!(diagnostics.error_count(), 0);
        assert!(diagnostics
            .warnings()
            .all(|w| w.message == "Request quota exhausted for star retrieval"));
        assert_eq!(slot.writes(), 1);
    }

    #[test]
    fn test_retry_budget_resets_for_each_page() {
        let mut client = FakeClient::new(vec![
            primary_limit(),
            primary_limit(),
            primary_limit(),
            page(vec![repo("a/one", "Rust", &[])], 2, Some("c1")),
            primary_limit(),
            primary_limit(),
            primary_limit(),
            page(vec![repo("b/two", "Go", &[])], 2, None),
        ]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();

        let catalog = assembler(&mut client)
            .assemble(&mut slot, &mut diagnostics)
            .unwrap();

        assert_eq!(catalog.stars.len(), 2);
        assert_eq!(diagnostics.error_count(), 0);
        assert_eq!(client.calls(), 8);
    }

    #[test]
    fn test_pages_are_requested_in_cursor_order() {
        let mut client = FakeClient::new(vec![
            page(vec![repo("a/one", "Rust", &[])], 3, Some("c1")),
            page(vec![repo("b/two", "Go", &[])], 3, Some("c2")),
            page(vec![repo("c/three", "C", &[])], 3, None),
        ]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();

        let catalog = assembler(&mut client)
            .assemble(&mut slot, &mut diagnostics)
            .unwrap();

        let names: Vec<&str> = catalog.stars.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a/one", "b/two", "c/three"]);
        assert_eq!(
            client.cursors,
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
        assert_eq!(catalog.login, LOGIN);
    }

    #[test]
    fn test_private_edges_are_skipped_but_counted() {
        let mut client = FakeClient::new(vec![page(vec![private_repo("me/secret")], 1, None)]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();

        let catalog = assembler(&mut client)
            .assemble(&mut slot, &mut diagnostics)
            .unwrap();

        assert!(catalog.stars.is_empty());
        assert_eq!(catalog.total, 1);
        assert!(!catalog.truncated);
    }

    #[test]
    fn test_missing_viewer_is_fatal_without_retry() {
        let mut client = FakeClient::new(vec![Ok(ViewerPage { viewer: None })]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();

        let err = assembler(&mut client)
            .assemble(&mut slot, &mut diagnostics)
            .unwrap_err();

        assert!(matches!(err, StarlistError::MissingViewer));
        assert_eq!(client.calls(), 1);
        assert!(!slot.exists());
    }

    #[test]
    fn test_repeated_cursor_stops_with_warning() {
        let mut client = FakeClient::new(vec![
            page(vec![repo("a/one", "Rust", &[])], 2, Some("c1")),
            page(vec![repo("b/two", "Go", &[])], 2, Some("c1")),
        ]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();

        let catalog = assembler(&mut client)
            .assemble(&mut slot, &mut diagnostics)
            .unwrap();

        assert_eq!(catalog.stars.len(), 2);
        assert_eq!(client.calls(), 2);
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_snapshot_is_written_and_stamped() {
        let mut client = FakeClient::new(vec![page(
            vec![repo("a/one", "Rust", &["cli"])],
            1,
            None,
        )]);
        let mut slot = MemorySlot::new();
        let mut diagnostics = Diagnostics::new();
        let started_at = instant(5);

        let catalog = assembler(&mut client)
            .assemble_at(started_at, &mut slot, &mut diagnostics)
            .unwrap();

        assert_eq!(catalog.updated_at, started_at);
        assert_eq!(slot.writes(), 1);
        assert_eq!(load_catalog(&slot).unwrap(), catalog);
    }
}
