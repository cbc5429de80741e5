// SPDX-License-Identifier: MIT
//! Snapshots and the two collections that hold them.
//!
//! A [`Snapshot`] is one complete aesthetic. History and favorites store
//! [`Entry`] values (a snapshot plus an id and a millisecond timestamp) and
//! compare them by [`Signature`], which ignores the seed: two seeds that
//! land on the same look are the same favorite.

use seedtone_theme::rng::fnv1a;
use seedtone_theme::{Fonts, Mode, Mood, Palette, TokenLocks};
use serde::{Deserialize, Serialize};

/// Maximum number of history entries kept, newest first.
pub const HISTORY_LIMIT: usize = 12;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One complete aesthetic: everything needed to reproduce or display it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: String,
    pub mode: Mode,
    pub mood: Mood,
    pub palette: Palette,
    pub fonts: Fonts,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            seed: String::new(),
            mode: Mode::default(),
            mood: Mood::default(),
            palette: Palette::default(),
            fonts: Fonts::default(),
        }
    }
}

impl Snapshot {
    #[must_use]
    pub const fn signature(&self) -> Signature<'_> {
        Signature {
            mode: self.mode,
            mood: self.mood,
            palette: self.palette,
            fonts: &self.fonts,
        }
    }
}

/// Equality key for history dedup and favorites: the look, not the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Signature<'a> {
    pub mode: Mode,
    pub mood: Mood,
    pub palette: Palette,
    pub fonts: &'a Fonts,
}

impl Signature<'_> {
    /// FNV-1a of the signature's JSON form.
    #[must_use]
    pub fn hash(&self) -> u32 {
        fnv1a(&serde_json::to_string(self).unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Locks
// ---------------------------------------------------------------------------

/// Group and per-token locks. A locked group is never regenerated; a locked
/// token survives regeneration of an unlocked palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Locks {
    pub palette: bool,
    pub fonts: bool,
    pub tokens: TokenLocks,
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A stored snapshot. Serialized flat: `{id, at, seed, mode, mood, palette, fonts}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub at: u64,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

impl Entry {
    /// A history entry: id is `<ms base36>_<fnv(seed) hex>`.
    #[must_use]
    pub fn history(snapshot: Snapshot, now_ms: u64) -> Self {
        let id = format!("{}_{:x}", to_base36(now_ms), fnv1a(&snapshot.seed));
        Self { id, at: now_ms, snapshot }
    }

    /// A favorite minted from a snapshot that had no entry of its own.
    #[must_use]
    pub fn favorite(snapshot: Snapshot, now_ms: u64) -> Self {
        Self::tagged("fav", snapshot, now_ms)
    }

    /// A favorite minted from the live state.
    #[must_use]
    pub fn current(snapshot: Snapshot, now_ms: u64) -> Self {
        Self::tagged("cur", snapshot, now_ms)
    }

    fn tagged(tag: &str, snapshot: Snapshot, now_ms: u64) -> Self {
        let hash = snapshot.signature().hash();
        let id = format!("{}_{tag}_{hash:x}", to_base36(now_ms));
        Self { id, at: now_ms, snapshot }
    }

    #[must_use]
    pub const fn signature(&self) -> Signature<'_> {
        self.snapshot.signature()
    }

    /// Case-insensitive substring match over seed, mode, mood and both
    /// font names. An empty (or all-whitespace) query matches everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let s = &self.snapshot;
        let hay = format!(
            "{} {} {} {} {}",
            s.seed, s.mode, s.mood, s.fonts.display, s.fonts.body
        )
        .to_lowercase();
        hay.contains(&needle)
    }
}

/// Lowercase base-36 rendering, as used in ids and random seeds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Newest-first ring of recent snapshots, capped at [`HISTORY_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    /// Adopt previously stored entries, trimming to the cap.
    #[must_use]
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.truncate(HISTORY_LIMIT);
        Self { entries }
    }

    /// Record `snapshot` at the head unless the head already has the same
    /// signature. Returns whether an entry was added.
    pub fn push(&mut self, snapshot: &Snapshot, now_ms: u64) -> bool {
        if self
            .entries
            .first()
            .is_some_and(|head| head.signature() == snapshot.signature())
        {
            return false;
        }
        self.entries.insert(0, Entry::history(snapshot.clone(), now_ms));
        self.entries.truncate(HISTORY_LIMIT);
        true
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| e.matches(query))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Newest-first starred snapshots, unique by signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<Entry>,
}

impl Favorites {
    #[must_use]
    pub const fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn contains(&self, snapshot: &Snapshot) -> bool {
        let sig = snapshot.signature();
        self.entries.iter().any(|e| e.signature() == sig)
    }

    /// Remove every entry sharing `entry`'s signature, or prepend `entry`
    /// if there was none. Returns `true` when the entry was added.
    pub fn toggle(&mut self, entry: Entry) -> bool {
        if self.contains(&entry.snapshot) {
            let sig = entry.signature();
            self.entries.retain(|e| e.signature() != sig);
            false
        } else {
            self.entries.insert(0, entry);
            true
        }
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| e.matches(query))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use seedtone_theme::{Token, generate_fonts, generate_palette};

    fn snap(seed: &str, mode: Mode, mood: Mood) -> Snapshot {
        Snapshot {
            seed: seed.to_owned(),
            mode,
            mood,
            palette: generate_palette(seed, mode, mood, &Palette::default(), &TokenLocks::default()),
            fonts: generate_fonts(seed, mood, &Fonts::default()),
        }
    }

    // ── Ids ─────────────────────────────────────────────────────────

    #[test]
    fn base36_matches_reference() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn history_id_is_time_and_seed_hash() {
        let e = Entry::history(snap("abc123", Mode::Light, Mood::Minimal), 36);
        assert_eq!(e.id, "10_38b29a05");
        assert_eq!(e.at, 36);
    }

    #[test]
    fn favorite_ids_carry_their_tag() {
        let s = snap("x", Mode::Dark, Mood::Neon);
        assert!(Entry::favorite(s.clone(), 1).id.starts_with("1_fav_"));
        assert!(Entry::current(s, 1).id.starts_with("1_cur_"));
    }

    // ── Signature ───────────────────────────────────────────────────

    #[test]
    fn signature_ignores_seed() {
        let a = snap("one", Mode::Light, Mood::Bold);
        let mut b = a.clone();
        b.seed = "two".into();
        assert_eq!(a.signature(), b.signature());
        assert_eq!(a.signature().hash(), b.signature().hash());

        b.palette.set(Token::Accent, seedtone_theme::Rgb::BLACK);
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn entry_serializes_flat() {
        let e = Entry::history(snap("abc123", Mode::Dark, Mood::Earthy), 5);
        let json: serde_json::Value = serde_json::to_value(&e).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for k in ["id", "at", "seed", "mode", "mood", "palette", "fonts"] {
            assert!(keys.contains(&k), "missing {k} in {keys:?}");
        }
        assert_eq!(json["mode"], "dark");
        assert_eq!(json["mood"], "Earthy");
        assert_eq!(serde_json::from_value::<Entry>(json).unwrap(), e);
    }

    // ── History ─────────────────────────────────────────────────────

    #[test]
    fn history_skips_consecutive_duplicates_only() {
        let mut h = History::default();
        let a = snap("a", Mode::Light, Mood::Minimal);
        let b = snap("b", Mode::Light, Mood::Minimal);
        assert!(h.push(&a, 1));
        assert!(!h.push(&a, 2));
        assert!(h.push(&b, 3));
        assert!(h.push(&a, 4));
        assert_eq!(h.len(), 3);
        assert_eq!(h.entries()[0].snapshot.seed, "a");
    }

    #[test]
    fn history_is_capped_newest_first() {
        let mut h = History::default();
        for i in 0..20 {
            h.push(&snap(&format!("s{i}"), Mode::Dark, Mood::Pastel), i);
        }
        assert_eq!(h.len(), HISTORY_LIMIT);
        assert_eq!(h.entries()[0].snapshot.seed, "s19");
        assert_eq!(h.entries()[HISTORY_LIMIT - 1].snapshot.seed, "s8");
    }

    #[test]
    fn history_from_entries_truncates() {
        let entries: Vec<Entry> = (0..15)
            .map(|i| Entry::history(snap(&i.to_string(), Mode::Light, Mood::Bold), i))
            .collect();
        assert_eq!(History::from_entries(entries).len(), HISTORY_LIMIT);
    }

    #[test]
    fn search_covers_seed_mood_and_fonts() {
        let mut h = History::default();
        h.push(&snap("Alpha", Mode::Dark, Mood::Neon), 1);
        h.push(&snap("beta", Mode::Light, Mood::Earthy), 2);
        assert_eq!(h.search("ALPHA").count(), 1);
        assert_eq!(h.search("earthy").count(), 1);
        assert_eq!(h.search("  ").count(), 2);
        assert_eq!(h.search("nope").count(), 0);

        let display = h.entries()[0].snapshot.fonts.display.to_uppercase();
        assert!(h.search(&display).count() >= 1);
    }

    // ── Favorites ───────────────────────────────────────────────────

    #[test]
    fn favorites_toggle_adds_then_removes() {
        let mut f = Favorites::default();
        let s = snap("fav", Mode::Light, Mood::Pastel);
        assert!(f.toggle(Entry::favorite(s.clone(), 1)));
        assert!(f.contains(&s));
        assert!(!f.toggle(Entry::current(s.clone(), 2)));
        assert!(f.is_empty());
    }

    #[test]
    fn favorites_keep_supplied_id() {
        let mut f = Favorites::default();
        let e = Entry::history(snap("keep", Mode::Dark, Mood::Bold), 9);
        f.toggle(e.clone());
        assert_eq!(f.find(&e.id), Some(&e));
    }

    #[test]
    fn favorites_are_newest_first() {
        let mut f = Favorites::default();
        f.toggle(Entry::favorite(snap("one", Mode::Light, Mood::Minimal), 1));
        f.toggle(Entry::favorite(snap("two", Mode::Light, Mood::Neon), 2));
        let seeds: Vec<&str> = f.entries().iter().map(|e| e.snapshot.seed.as_str()).collect();
        assert_eq!(seeds, ["two", "one"]);
    }

    fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
        ("[a-z0-9]{1,6}", any::<bool>(), prop::sample::select(Mood::ALL.to_vec())).prop_map(
            |(seed, dark, mood)| snap(&seed, if dark { Mode::Dark } else { Mode::Light }, mood),
        )
    }

    proptest! {
        #[test]
        fn double_toggle_restores_favorites(
            existing in prop::collection::vec(arb_snapshot(), 0..5),
            s in arb_snapshot(),
        ) {
            let mut f = Favorites::default();
            for (i, e) in existing.iter().enumerate() {
                if !f.contains(e) {
                    f.toggle(Entry::favorite(e.clone(), i as u64));
                }
            }
            prop_assume!(!f.contains(&s));
            let before = f.clone();
            f.toggle(Entry::favorite(s.clone(), 99));
            f.toggle(Entry::favorite(s, 100));
            prop_assert_eq!(f, before);
        }

        #[test]
        fn history_never_exceeds_cap(snaps in prop::collection::vec(arb_snapshot(), 0..30)) {
            let mut h = History::default();
            for (i, s) in snaps.iter().enumerate() {
                h.push(s, i as u64);
                prop_assert!(h.len() <= HISTORY_LIMIT);
            }
            for pair in h.entries().windows(2) {
                prop_assert_ne!(pair[0].signature(), pair[1].signature());
            }
        }
    }
}
