// SPDX-License-Identifier: MIT
//! End-to-end sessions over a real on-disk store.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use seedtone_studio::store::{HISTORY_KEY, LAST_KEY};
use seedtone_studio::{
    FileStore, KeyValueStore, ManualClock, MemoryQuery, QueryState, SHARE_PARAM, Studio, share,
};
use seedtone_theme::{Mode, Mood, PairKind, Token};

fn boot(dir: &TempDir, query: &MemoryQuery, clock: &ManualClock) -> Studio {
    Studio::builder()
        .store(FileStore::new(dir.path()))
        .query(query.clone())
        .clock(clock.clone())
        .seed_rng(StdRng::seed_from_u64(42))
        .boot()
}

#[test]
fn session_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::at(1_700_000_000_000);

    let mut first = boot(&dir, &MemoryQuery::new(), &clock);
    first.generate_from("harbor");
    clock.advance(1_000);
    first.set_mood(Mood::Pastel);
    first.toggle_token_lock(Token::Accent);
    first.toggle_fonts_lock();
    assert!(first.toggle_current_favorite());
    let snapshot = first.snapshot().clone();
    let history = first.history().clone();
    let favorites = first.favorites().clone();
    let locks = *first.locks();
    drop(first);

    let second = boot(&dir, &MemoryQuery::new(), &clock);
    assert_eq!(second.snapshot(), &snapshot);
    assert_eq!(second.history(), &history);
    assert_eq!(second.favorites(), &favorites);
    assert_eq!(second.locks(), &locks);
    assert!(second.is_current_favorite());
}

#[test]
fn share_link_opens_someone_elses_aesthetic() {
    let theirs_dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::at(1_000);
    let mut theirs = boot(&theirs_dir, &MemoryQuery::new(), &clock);
    theirs.generate_from("gift");
    theirs.set_mode(Mode::Dark);
    let token = theirs.share_token().to_owned();

    let mine_dir = tempfile::tempdir().unwrap();
    let query = MemoryQuery::with_param(SHARE_PARAM, &token);
    let mut mine = boot(&mine_dir, &query, &clock);
    assert_eq!(mine.snapshot(), theirs.snapshot());
    assert!(mine.history().is_empty());
    assert_eq!(
        mine.drain_notices().iter().map(|n| n.message.as_str()).collect::<Vec<_>>(),
        ["Loaded from share link."]
    );

    // The opened aesthetic becomes this user's last session.
    let store = FileStore::new(mine_dir.path());
    let last = store.load(LAST_KEY).unwrap().unwrap();
    assert_eq!(&share::from_json(&last).unwrap(), theirs.snapshot());
}

#[test]
fn broken_link_and_corrupt_files_fall_back_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{HISTORY_KEY}.json")), "{not json").unwrap();
    std::fs::write(dir.path().join(format!("{LAST_KEY}.json")), "[]").unwrap();

    let clock = ManualClock::at(5);
    let query = MemoryQuery::with_param(SHARE_PARAM, "bm90IGpzb24");
    let studio = boot(&dir, &query, &clock);

    // First run: one fresh entry, corrupt history discarded.
    assert_eq!(studio.history().len(), 1);
    assert_eq!(studio.snapshot().mode, Mode::Light);
    assert_eq!(studio.snapshot().mood, Mood::Minimal);
}

#[test]
fn edits_reach_the_link_after_the_quiet_period() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::at(0);
    let query = MemoryQuery::new();
    let mut studio = boot(&dir, &query, &clock);

    studio.set_token(Token::Text, "#f0f0f0").unwrap();
    assert!(studio.report().any_failing);
    studio.auto_fix();
    assert!(studio.report().pair(PairKind::TextOnBg).passes());
    assert!(studio.report().pair(PairKind::TextOnSurface).passes());

    assert!(!studio.poll());
    clock.advance(120);
    assert!(studio.poll());

    let linked = share::decode(&query.get(SHARE_PARAM).unwrap()).unwrap();
    assert_eq!(&linked, studio.snapshot());
}

#[test]
fn restore_from_favorites_after_history_is_cleared() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::at(10);
    let mut studio = boot(&dir, &MemoryQuery::new(), &clock);

    studio.generate_from("keeper");
    let keeper = studio.snapshot().clone();
    let id = studio.history().entries()[0].id.clone();
    assert!(studio.toggle_favorite(&id).unwrap());

    clock.advance(1);
    studio.generate_from("other");
    studio.clear_history();
    assert!(studio.history().is_empty());

    studio.restore(&id).unwrap();
    assert_eq!(studio.snapshot(), &keeper);
    assert!(studio.history().is_empty(), "restoring does not record");
}
