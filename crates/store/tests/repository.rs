use std::collections::HashMap;

use puzzle_core::{Level, PuzzleId, PuzzleSave};
use puzzle_store::{
    EnglishStrings, FilePuzzleStore, MemoryPuzzleStore, PuzzleRepository, PuzzleRow, StoreError,
};
use tempfile::TempDir;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn seed_rows() -> Vec<PuzzleRow> {
    vec![
        PuzzleRow::seed(PuzzleId::new(1), 1, Level::Easy, "e1-givens", "e1-solution"),
        PuzzleRow::seed(PuzzleId::new(2), 2, Level::Easy, "e2-givens", "e2-solution"),
        PuzzleRow::seed(PuzzleId::new(3), 3, Level::Easy, "e3-givens", "e3-solution"),
        PuzzleRow::seed(PuzzleId::new(4), 4, Level::Easy, "e4-givens", "e4-solution"),
        PuzzleRow::seed(PuzzleId::new(10), 1, Level::Medium, "m1-givens", "m1-solution"),
        PuzzleRow::seed(PuzzleId::new(11), 2, Level::Medium, "m2-givens", "m2-solution"),
    ]
}

async fn seeded_repository() -> PuzzleRepository {
    init_tracing();
    let repo = PuzzleRepository::spawn_seeded(
        Box::new(MemoryPuzzleStore::new()),
        Box::new(EnglishStrings),
        7,
    );
    repo.seed(seed_rows()).await.expect("seeding should succeed");
    repo
}

#[tokio::test]
async fn get_puzzle_resolves_title_from_strings() {
    let repo = seeded_repository().await;

    let puzzle = repo.get_puzzle(PuzzleId::new(10)).await.unwrap();
    assert_eq!(puzzle.level, Level::Medium);
    assert_eq!(puzzle.title, "Medium 1");
    assert_eq!(puzzle.givens, "m1-givens");
}

#[tokio::test]
async fn get_puzzle_fails_explicitly_when_absent() {
    let repo = seeded_repository().await;

    let result = repo.get_puzzle(PuzzleId::new(999)).await;
    assert!(matches!(
        result,
        Err(StoreError::PuzzleNotFound(id)) if id == PuzzleId::new(999)
    ));
}

#[tokio::test]
async fn save_round_trips_every_mutated_field() {
    let repo = seeded_repository().await;

    let save = PuzzleSave {
        id: PuzzleId::new(2),
        game: "partial-grid".to_string(),
        notes: "pencil marks".to_string(),
        time: Some(123_456),
        bookmarked: true,
        progress: 40,
        completed: false,
        cheats: 3,
    };
    repo.save(save.clone()).await.unwrap();

    let puzzle = repo.get_puzzle(PuzzleId::new(2)).await.unwrap();
    assert_eq!(puzzle.game, save.game);
    assert_eq!(puzzle.notes, save.notes);
    assert_eq!(puzzle.time, save.time);
    assert_eq!(puzzle.bookmarked, save.bookmarked);
    assert_eq!(puzzle.progress, save.progress);
    assert_eq!(puzzle.completed, save.completed);
    assert_eq!(puzzle.cheats, save.cheats);
    // Seeded fields are untouched by saves.
    assert_eq!(puzzle.givens, "e2-givens");
    assert_eq!(puzzle.solution, "e2-solution");
}

#[tokio::test]
async fn hide_completed_filters_only_completed_puzzles() {
    let repo = seeded_repository().await;
    repo.save(PuzzleSave::completed(PuzzleId::new(1), "done", 60_000, 0))
        .await
        .unwrap();

    let mut filtered = repo.get_puzzles(Level::Easy, true);
    let snapshot = filtered.recv().await.unwrap();
    assert_eq!(snapshot.len(), 3);
    assert!(snapshot.iter().all(|p| !p.completed));

    let mut unfiltered = repo.get_puzzles(Level::Easy, false);
    let snapshot = unfiltered.recv().await.unwrap();
    assert_eq!(snapshot.len(), 4);
    let ids: Vec<_> = snapshot.iter().map(|p| p.id.value()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn live_query_reemits_after_each_write() {
    let repo = seeded_repository().await;

    let mut live = repo.get_puzzles(Level::Easy, false);
    let initial = live.recv().await.unwrap();
    assert!(initial.iter().all(|p| !p.is_played()));

    repo.save(PuzzleSave::in_progress(PuzzleId::new(3), "grid", "", 9_000, 25))
        .await
        .unwrap();

    let updated = live.recv().await.unwrap();
    let changed = updated.iter().find(|p| p.id == PuzzleId::new(3)).unwrap();
    assert_eq!(changed.time, Some(9_000));
    assert_eq!(changed.progress, 25);
}

#[tokio::test]
async fn dropped_live_query_does_not_block_writes() {
    let repo = seeded_repository().await;

    let mut live = repo.get_puzzles(Level::Easy, false);
    let _ = live.recv().await.unwrap();
    drop(live);

    for _ in 0..32 {
        repo.save(PuzzleSave::in_progress(PuzzleId::new(1), "g", "", 1_000, 5))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn bulk_lookup_is_unfiltered_and_skips_missing() {
    let repo = seeded_repository().await;
    repo.save(PuzzleSave::completed(PuzzleId::new(4), "done", 5_000, 0))
        .await
        .unwrap();

    let puzzles = repo
        .get_puzzles_by_id(&[PuzzleId::new(4), PuzzleId::new(10), PuzzleId::new(999)])
        .await
        .unwrap();
    let ids: Vec<_> = puzzles.iter().map(|p| p.id.value()).collect();
    assert_eq!(ids, vec![4, 10]);
    assert!(puzzles[0].completed);
}

#[tokio::test]
async fn random_unplayed_respects_level_and_play_time() {
    let repo = seeded_repository().await;
    // Mark one easy puzzle as played; it must never be picked.
    repo.save(PuzzleSave::in_progress(PuzzleId::new(4), "g", "", 30_000, 10))
        .await
        .unwrap();

    for _ in 0..50 {
        let id = repo
            .get_random_unplayed_puzzle_id(Level::Easy)
            .await
            .unwrap();
        assert!(matches!(id.value(), 1..=3));
    }
}

#[tokio::test]
async fn random_unplayed_is_roughly_uniform() {
    let repo = seeded_repository().await;

    let mut counts: HashMap<PuzzleId, usize> = HashMap::new();
    for _ in 0..400 {
        let id = repo
            .get_random_unplayed_puzzle_id(Level::Easy)
            .await
            .unwrap();
        *counts.entry(id).or_default() += 1;
    }

    assert_eq!(counts.len(), 4);
    for (&id, &count) in &counts {
        assert!(
            (60..=140).contains(&count),
            "pick counts skewed: {id} chosen {count}/400 times"
        );
    }
}

#[tokio::test]
async fn random_unplayed_fails_when_no_candidate_qualifies() {
    let repo = seeded_repository().await;

    // Hard has no puzzles at all.
    let result = repo.get_random_unplayed_puzzle_id(Level::Hard).await;
    assert!(matches!(
        result,
        Err(StoreError::NoUnplayedPuzzles(Level::Hard))
    ));

    // Medium has puzzles, but all of them played.
    repo.save_all(&[
        PuzzleSave::in_progress(PuzzleId::new(10), "g", "", 1_000, 5),
        PuzzleSave::in_progress(PuzzleId::new(11), "g", "", 2_000, 5),
    ])
    .await
    .unwrap();
    let result = repo.get_random_unplayed_puzzle_id(Level::Medium).await;
    assert!(matches!(
        result,
        Err(StoreError::NoUnplayedPuzzles(Level::Medium))
    ));
}

#[tokio::test]
async fn bookmark_flow_set_list_and_clear_all() {
    let repo = seeded_repository().await;

    repo.set_bookmarked(PuzzleId::new(1), true).await.unwrap();
    repo.set_bookmarked(PuzzleId::new(10), true).await.unwrap();

    let mut bookmarked = repo.get_bookmarked_puzzles();
    let snapshot = bookmarked.recv().await.unwrap();
    let ids: Vec<_> = snapshot.iter().map(|p| p.id.value()).collect();
    assert_eq!(ids, vec![1, 10]);

    repo.remove_all_bookmarks().await.unwrap();
    let snapshot = bookmarked.recv().await.unwrap();
    assert!(snapshot.is_empty());

    let mut all = repo.get_puzzles(Level::Easy, false);
    let snapshot = all.recv().await.unwrap();
    assert!(snapshot.iter().all(|p| !p.bookmarked));
}

#[tokio::test]
async fn count_completed_spans_all_levels() {
    let repo = seeded_repository().await;
    assert_eq!(repo.count_completed().await.unwrap(), 0);

    repo.save_all(&[
        PuzzleSave::completed(PuzzleId::new(1), "done", 10_000, 0),
        PuzzleSave::completed(PuzzleId::new(10), "done", 20_000, 1),
    ])
    .await
    .unwrap();

    assert_eq!(repo.count_completed().await.unwrap(), 2);

    let mut completed = repo.get_completed_puzzles();
    let snapshot = completed.recv().await.unwrap();
    assert_eq!(snapshot.len(), 2);
}

#[tokio::test]
async fn bulk_save_with_unknown_id_writes_nothing() {
    let repo = seeded_repository().await;

    let result = repo
        .save_all(&[
            PuzzleSave::completed(PuzzleId::new(1), "done", 10, 0),
            PuzzleSave::completed(PuzzleId::new(999), "done", 10, 0),
        ])
        .await;
    assert!(matches!(result, Err(StoreError::PuzzleNotFound(_))));

    let puzzle = repo.get_puzzle(PuzzleId::new(1)).await.unwrap();
    assert!(!puzzle.completed);
    assert_eq!(repo.count_completed().await.unwrap(), 0);
}

#[tokio::test]
async fn change_subscription_sees_committed_writes() {
    let repo = seeded_repository().await;
    let mut changes = repo.subscribe_changes();

    repo.set_bookmarked(PuzzleId::new(2), true).await.unwrap();
    repo.remove_all_bookmarks().await.unwrap();

    assert_eq!(
        changes.recv().await.unwrap(),
        puzzle_store::StoreChange::Bookmark { set: true }
    );
    assert_eq!(
        changes.recv().await.unwrap(),
        puzzle_store::StoreChange::BookmarksCleared { count: 1 }
    );
}

#[tokio::test]
async fn operations_fail_once_worker_is_shut_down() {
    let repo = seeded_repository().await;
    repo.shutdown().await;

    let result = repo.get_puzzle(PuzzleId::new(1)).await;
    assert!(matches!(
        result,
        Err(StoreError::WorkerGone | StoreError::ReplyDropped(_))
    ));
}

#[tokio::test]
async fn file_backed_store_survives_repository_restart() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("puzzles.bin");

    {
        let repo = PuzzleRepository::spawn_seeded(
            Box::new(FilePuzzleStore::open(&path).unwrap()),
            Box::new(EnglishStrings),
            7,
        );
        repo.seed(seed_rows()).await.unwrap();
        repo.save(PuzzleSave::completed(PuzzleId::new(3), "done", 45_000, 2))
            .await
            .unwrap();
        repo.set_bookmarked(PuzzleId::new(10), true).await.unwrap();
        repo.shutdown().await;
    }

    let repo = PuzzleRepository::spawn(
        Box::new(FilePuzzleStore::open(&path).unwrap()),
        Box::new(EnglishStrings),
    );

    let puzzle = repo.get_puzzle(PuzzleId::new(3)).await.unwrap();
    assert!(puzzle.completed);
    assert_eq!(puzzle.time, Some(45_000));
    assert_eq!(puzzle.cheats, 2);

    let mut bookmarked = repo.get_bookmarked_puzzles();
    let snapshot = bookmarked.recv().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, PuzzleId::new(10));
}
