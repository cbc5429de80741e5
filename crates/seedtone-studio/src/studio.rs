// SPDX-License-Identifier: MIT
//! The live aesthetic and every operation that changes it.
//!
//! All mutation funnels through `Studio::commit`, which applies a whole-value
//! patch, optionally records history, then re-derives the contrast report
//! and share token, schedules the link rewrite and persists. Nothing else
//! writes to the live state.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use seedtone_color::Rgb;
use seedtone_theme::fonts::{BODY_FACES, DISPLAY_FACES, FontFace};
use seedtone_theme::{
    ContrastReport, Fonts, Mode, Mood, Palette, Token, auto_fix, css_variables, evaluate,
    font_snippet, generate_fonts, generate_palette,
};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{Result, StudioError};
use crate::link::{DEFAULT_LINK_DEBOUNCE_MS, Debouncer, MemoryQuery, QueryState, SHARE_PARAM};
use crate::share;
use crate::snapshot::{Entry, Favorites, History, Locks, Snapshot, to_base36};
use crate::store::{FAVORITES_KEY, HISTORY_KEY, KeyValueStore, LAST_KEY, LOCKS_KEY, MemoryStore};

/// Random seeds are drawn below this bound and rendered in base 36.
const SEED_SPACE: u64 = 1_000_000_000;

/// Title used when an operation does not name one.
const DEFAULT_NOTICE_TITLE: &str = "Copied";

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// A short user-facing announcement produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_NOTICE_TITLE.to_owned(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ---------------------------------------------------------------------------
// Patch / Commit
// ---------------------------------------------------------------------------

/// Whole-value replacements. `None` leaves a field as it is.
#[derive(Default)]
struct Patch {
    seed: Option<String>,
    mode: Option<Mode>,
    mood: Option<Mood>,
    palette: Option<Palette>,
    fonts: Option<Fonts>,
    locks: Option<Locks>,
    history: Option<History>,
    favorites: Option<Favorites>,
}

impl Patch {
    fn snapshot(s: Snapshot) -> Self {
        Self {
            seed: Some(s.seed),
            mode: Some(s.mode),
            mood: Some(s.mood),
            palette: Some(s.palette),
            fonts: Some(s.fonts),
            ..Self::default()
        }
    }
}

/// How a patch is committed.
struct Commit {
    op: &'static str,
    record: bool,
    announce: Option<String>,
}

impl Commit {
    const fn quiet(op: &'static str) -> Self {
        Self {
            op,
            record: false,
            announce: None,
        }
    }

    const fn recorded(op: &'static str) -> Self {
        Self {
            op,
            record: true,
            announce: None,
        }
    }

    fn announce(mut self, message: impl Into<String>) -> Self {
        self.announce = Some(message.into());
        self
    }
}

/// Filtered views over history and favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<'a> {
    pub history: Vec<&'a Entry>,
    pub favorites: Vec<&'a Entry>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Wires collaborators and first-run defaults, then boots a [`Studio`].
pub struct StudioBuilder {
    store: Box<dyn KeyValueStore>,
    query: Box<dyn QueryState>,
    clock: Box<dyn Clock>,
    rng: Option<StdRng>,
    mode: Mode,
    mood: Mood,
    link_debounce_ms: u64,
}

impl Default for StudioBuilder {
    fn default() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            query: Box::new(MemoryQuery::new()),
            clock: Box::new(SystemClock),
            rng: None,
            mode: Mode::default(),
            mood: Mood::default(),
            link_debounce_ms: DEFAULT_LINK_DEBOUNCE_MS,
        }
    }
}

impl StudioBuilder {
    #[must_use]
    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    #[must_use]
    pub fn query(mut self, query: impl QueryState + 'static) -> Self {
        self.query = Box::new(query);
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Source for random seeds. Defaults to an entropy-seeded generator.
    #[must_use]
    pub fn seed_rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Mode and mood for a first run.
    #[must_use]
    pub const fn defaults(mut self, mode: Mode, mood: Mood) -> Self {
        self.mode = mode;
        self.mood = mood;
        self
    }

    #[must_use]
    pub const fn link_debounce_ms(mut self, ms: u64) -> Self {
        self.link_debounce_ms = ms;
        self
    }

    /// Apply first-run defaults and link timing from a [`Config`].
    #[must_use]
    pub const fn config(self, config: &Config) -> Self {
        self.defaults(config.mode, config.mood)
            .link_debounce_ms(config.link_debounce_ms)
    }

    /// Load persisted state and hydrate the live snapshot.
    ///
    /// Sources, first match wins: the share token in the query state, the
    /// persisted last snapshot, then a fresh generation recorded to
    /// history. Undecodable sources are logged and skipped.
    #[must_use]
    pub fn boot(self) -> Studio {
        let mut studio = Studio {
            current: Snapshot::default(),
            locks: Locks::default(),
            history: History::default(),
            favorites: Favorites::default(),
            report: evaluate(&Palette::default()),
            token: String::new(),
            notices: Vec::new(),
            link: Debouncer::new(self.link_debounce_ms),
            store: self.store,
            query: self.query,
            clock: self.clock,
            rng: self.rng.unwrap_or_else(StdRng::from_entropy),
        };
        studio.hydrate(self.mode, self.mood);
        studio
    }
}

// ---------------------------------------------------------------------------
// Studio
// ---------------------------------------------------------------------------

/// Single-owner live state: snapshot, locks, history and favorites, plus
/// the values derived from them.
pub struct Studio {
    current: Snapshot,
    locks: Locks,
    history: History,
    favorites: Favorites,
    report: ContrastReport,
    token: String,
    notices: Vec<Notice>,
    link: Debouncer<String>,
    store: Box<dyn KeyValueStore>,
    query: Box<dyn QueryState>,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl fmt::Debug for Studio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Studio")
            .field("current", &self.current)
            .field("locks", &self.locks)
            .field("history", &self.history.len())
            .field("favorites", &self.favorites.len())
            .field("store", &self.store.name())
            .finish_non_exhaustive()
    }
}

impl Studio {
    #[must_use]
    pub fn builder() -> StudioBuilder {
        StudioBuilder::default()
    }

    // ── Boot ────────────────────────────────────────────────────────

    fn hydrate(&mut self, mode: Mode, mood: Mood) {
        self.locks = self.load_json(LOCKS_KEY).unwrap_or_default();
        self.favorites = Favorites::from_entries(self.load_entries(FAVORITES_KEY));
        self.history = History::from_entries(self.load_entries(HISTORY_KEY));

        if let Some(token) = self.query.get(SHARE_PARAM) {
            match share::decode(&token) {
                Ok(snapshot) => {
                    debug!(seed = %snapshot.seed, "booting from share link");
                    let commit = Commit::quiet("boot_link").announce("Loaded from share link.");
                    self.commit(Patch::snapshot(snapshot), commit);
                    return;
                }
                Err(e) => warn!(error = %e, "ignoring share token"),
            }
        }

        match self.load_raw(LAST_KEY).map(|json| share::from_json(&json)) {
            Some(Ok(snapshot)) => {
                debug!(seed = %snapshot.seed, "booting from last session");
                self.commit(Patch::snapshot(snapshot), Commit::quiet("boot_last"));
                return;
            }
            Some(Err(e)) => warn!(error = %e, "ignoring stored last session"),
            None => {}
        }

        let seed = self.random_seed();
        debug!(%seed, %mode, %mood, "first run");
        let palette = generate_palette(&seed, mode, mood, &Palette::default(), &self.locks.tokens);
        let fonts = generate_fonts(&seed, mood, &Fonts::default());
        let snapshot = Snapshot {
            seed,
            mode,
            mood,
            palette,
            fonts,
        };
        self.commit(Patch::snapshot(snapshot), Commit::recorded("first_run"));
    }

    fn load_raw(&self, key: &str) -> Option<String> {
        match self.store.load(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, store = self.store.name(), error = %e, "load failed");
                None
            }
        }
    }

    fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.load_raw(key)?;
        serde_json::from_str(&raw)
            .inspect_err(|e| warn!(key, error = %e, "discarding unreadable value"))
            .ok()
    }

    /// Stored entries, skipping any that fail validation.
    fn load_entries(&self, key: &str) -> Vec<Entry> {
        let Some(values) = self.load_json::<Vec<serde_json::Value>>(key) else {
            return Vec::new();
        };
        values
            .into_iter()
            .filter_map(|v| {
                serde_json::from_value::<Entry>(v)
                    .inspect_err(|e| warn!(key, error = %e, "skipping invalid entry"))
                    .ok()
            })
            .collect()
    }

    // ── Commit ──────────────────────────────────────────────────────

    fn commit(&mut self, patch: Patch, commit: Commit) {
        let Patch {
            seed,
            mode,
            mood,
            palette,
            fonts,
            locks,
            history,
            favorites,
        } = patch;
        if let Some(seed) = seed {
            self.current.seed = seed;
        }
        if let Some(mode) = mode {
            self.current.mode = mode;
        }
        if let Some(mood) = mood {
            self.current.mood = mood;
        }
        if let Some(palette) = palette {
            self.current.palette = palette;
        }
        if let Some(fonts) = fonts {
            self.current.fonts = fonts;
        }
        if let Some(locks) = locks {
            self.locks = locks;
        }
        if let Some(history) = history {
            self.history = history;
        }
        if let Some(favorites) = favorites {
            self.favorites = favorites;
        }

        let now = self.clock.now_ms();
        let recorded = commit.record && self.history.push(&self.current, now);

        self.report = evaluate(&self.current.palette);
        self.token = share::encode(&self.current);
        self.link.schedule(self.token.clone(), now);
        self.persist();

        info!(
            op = commit.op,
            seed = %self.current.seed,
            mode = %self.current.mode,
            mood = %self.current.mood,
            recorded,
            "commit"
        );
        if let Some(message) = commit.announce {
            self.notices.push(Notice::new(message));
        }
    }

    fn persist(&self) {
        self.save_json(FAVORITES_KEY, &self.favorites);
        self.save_json(HISTORY_KEY, &self.history);
        self.save_json(LOCKS_KEY, &self.locks);
        self.save_raw(LAST_KEY, &share::to_json(&self.current));
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.save_raw(key, &json),
            Err(e) => warn!(key, error = %e, "serialize failed"),
        }
    }

    fn save_raw(&self, key: &str, json: &str) {
        if let Err(e) = self.store.save(key, json) {
            warn!(key, store = self.store.name(), error = %e, "save failed");
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    #[must_use]
    pub const fn locks(&self) -> &Locks {
        &self.locks
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub const fn report(&self) -> &ContrastReport {
        &self.report
    }

    /// Share token for the live snapshot.
    #[must_use]
    pub fn share_token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn css_variables(&self) -> String {
        css_variables(&self.current.palette)
    }

    #[must_use]
    pub fn font_snippet(&self) -> String {
        font_snippet(&self.current.fonts)
    }

    /// Take every notice queued since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ── Link ────────────────────────────────────────────────────────

    /// Rewrite the share parameter if the quiet period has elapsed.
    /// Returns whether a write happened.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.link
            .poll(now)
            .map(|token| self.query.replace(SHARE_PARAM, &token))
            .is_some()
    }

    /// Rewrite the share parameter now if a write is pending.
    pub fn flush(&mut self) -> bool {
        self.link
            .flush()
            .map(|token| self.query.replace(SHARE_PARAM, &token))
            .is_some()
    }

    // ── Generation ──────────────────────────────────────────────────

    fn random_seed(&mut self) -> String {
        to_base36(self.rng.gen_range(0..SEED_SPACE))
    }

    fn seed_or_random(&mut self) -> String {
        if self.current.seed.is_empty() {
            self.random_seed()
        } else {
            self.current.seed.clone()
        }
    }

    fn generate_with(&mut self, seed: String, op: &'static str) {
        let Snapshot { mode, mood, .. } = self.current;
        let palette = if self.locks.palette {
            self.current.palette
        } else {
            generate_palette(&seed, mode, mood, &self.current.palette, &self.locks.tokens)
        };
        let fonts = if self.locks.fonts {
            self.current.fonts.clone()
        } else {
            generate_fonts(&seed, mood, &self.current.fonts)
        };
        let patch = Patch {
            seed: Some(seed),
            palette: Some(palette),
            fonts: Some(fonts),
            ..Patch::default()
        };
        self.commit(patch, Commit::recorded(op));
    }

    /// New random seed; unlocked groups regenerate.
    pub fn generate(&mut self) {
        let seed = self.random_seed();
        self.generate_with(seed, "generate");
    }

    /// Same seed (or a fresh one if none is set); unlocked groups regenerate.
    pub fn regenerate(&mut self) {
        let seed = self.seed_or_random();
        self.generate_with(seed, "regenerate");
    }

    /// Explicit seed. An empty seed draws a random one.
    pub fn generate_from(&mut self, seed: &str) {
        let seed = if seed.is_empty() {
            self.random_seed()
        } else {
            seed.to_owned()
        };
        self.generate_with(seed, "generate_from");
    }

    // ── Mode & mood ─────────────────────────────────────────────────

    /// Switch mode; an unlocked palette is regenerated from the same seed.
    pub fn set_mode(&mut self, mode: Mode) {
        let patch = Patch {
            mode: Some(mode),
            ..Patch::default()
        };
        self.commit(patch, Commit::quiet("set_mode").announce(format!("Mode: {mode}.")));

        if !self.locks.palette {
            let seed = self.seed_or_random();
            let palette = generate_palette(
                &seed,
                mode,
                self.current.mood,
                &self.current.palette,
                &self.locks.tokens,
            );
            let patch = Patch {
                seed: Some(seed),
                palette: Some(palette),
                ..Patch::default()
            };
            self.commit(patch, Commit::recorded("set_mode"));
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.current.mode.toggled());
    }

    /// Switch mood; unlocked palette and fonts are regenerated from the
    /// same seed.
    pub fn set_mood(&mut self, mood: Mood) {
        let patch = Patch {
            mood: Some(mood),
            ..Patch::default()
        };
        self.commit(patch, Commit::quiet("set_mood").announce(format!("Mood: {mood}.")));

        if self.locks.palette && self.locks.fonts {
            return;
        }
        let seed = self.seed_or_random();
        let mut patch = Patch {
            seed: Some(seed.clone()),
            ..Patch::default()
        };
        if !self.locks.palette {
            patch.palette = Some(generate_palette(
                &seed,
                self.current.mode,
                mood,
                &self.current.palette,
                &self.locks.tokens,
            ));
        }
        if !self.locks.fonts {
            patch.fonts = Some(generate_fonts(&seed, mood, &self.current.fonts));
        }
        self.commit(patch, Commit::recorded("set_mood"));
    }

    // ── Locks ───────────────────────────────────────────────────────

    fn set_locks(&mut self, locks: Locks, op: &'static str, message: String) {
        let patch = Patch {
            locks: Some(locks),
            ..Patch::default()
        };
        self.commit(patch, Commit::quiet(op).announce(message));
    }

    /// Returns the new lock state.
    pub fn toggle_palette_lock(&mut self) -> bool {
        let mut locks = self.locks;
        locks.palette = !locks.palette;
        let state = if locks.palette { "locked" } else { "unlocked" };
        self.set_locks(locks, "lock_palette", format!("Palette {state}."));
        locks.palette
    }

    /// Returns the new lock state.
    pub fn toggle_fonts_lock(&mut self) -> bool {
        let mut locks = self.locks;
        locks.fonts = !locks.fonts;
        let state = if locks.fonts { "locked" } else { "unlocked" };
        self.set_locks(locks, "lock_fonts", format!("Fonts {state}."));
        locks.fonts
    }

    /// Returns the new lock state.
    pub fn toggle_token_lock(&mut self, token: Token) -> bool {
        let mut locks = self.locks;
        let locked = locks.tokens.toggle(token);
        let verb = if locked { "Locked" } else { "Unlocked" };
        self.set_locks(locks, "lock_token", format!("{verb} {}.", token.label()));
        locked
    }

    // ── Manual edits ────────────────────────────────────────────────

    /// Replace one token's color.
    ///
    /// # Errors
    ///
    /// [`StudioError::InvalidColor`] if `hex` is not `#rrggbb`; the palette
    /// is left untouched.
    pub fn set_token(&mut self, token: Token, hex: &str) -> Result<()> {
        let color = Rgb::from_hex(hex)?;
        let patch = Patch {
            palette: Some(self.current.palette.with(token, color)),
            ..Patch::default()
        };
        self.commit(patch, Commit::quiet("set_token"));
        Ok(())
    }

    /// # Errors
    ///
    /// [`StudioError::UnknownFont`] if `name` is not a display face.
    pub fn set_display_font(&mut self, name: &str) -> Result<()> {
        let face = resolve_face(DISPLAY_FACES, "display", name)?;
        let fonts = Fonts::new(face.name, self.current.fonts.body.clone());
        self.set_fonts(fonts, "set_display_font", "Updated display font.");
        Ok(())
    }

    /// # Errors
    ///
    /// [`StudioError::UnknownFont`] if `name` is not a body face.
    pub fn set_body_font(&mut self, name: &str) -> Result<()> {
        let face = resolve_face(BODY_FACES, "body", name)?;
        let fonts = Fonts::new(self.current.fonts.display.clone(), face.name);
        self.set_fonts(fonts, "set_body_font", "Updated body font.");
        Ok(())
    }

    pub fn swap_fonts(&mut self) {
        let fonts = self.current.fonts.swapped();
        self.set_fonts(fonts, "swap_fonts", "Swapped fonts.");
    }

    fn set_fonts(&mut self, fonts: Fonts, op: &'static str, message: &str) {
        let patch = Patch {
            fonts: Some(fonts),
            ..Patch::default()
        };
        self.commit(patch, Commit::recorded(op).announce(message));
    }

    /// Repair `text` and `muted` for readability.
    pub fn auto_fix(&mut self) {
        let patch = Patch {
            palette: Some(auto_fix(&self.current.palette)),
            ..Patch::default()
        };
        self.commit(patch, Commit::recorded("auto_fix").announce("Contrast auto-fixed."));
    }

    // ── History & favorites ─────────────────────────────────────────

    fn find_entry(&self, id: &str) -> Result<Entry> {
        self.history
            .find(id)
            .or_else(|| self.favorites.find(id))
            .cloned()
            .ok_or_else(|| StudioError::unknown_entry(id))
    }

    /// Make a stored entry live again, without recording history.
    ///
    /// # Errors
    ///
    /// [`StudioError::UnknownEntry`] if neither list holds `id`.
    pub fn restore(&mut self, id: &str) -> Result<()> {
        let entry = self.find_entry(id)?;
        self.commit(
            Patch::snapshot(entry.snapshot),
            Commit::quiet("restore").announce("Restored aesthetic."),
        );
        Ok(())
    }

    fn toggle_favorite_entry(&mut self, entry: Entry) -> bool {
        let mut favorites = self.favorites.clone();
        let added = favorites.toggle(entry);
        let message = if added {
            "Saved to favorites."
        } else {
            "Removed from favorites."
        };
        let patch = Patch {
            favorites: Some(favorites),
            ..Patch::default()
        };
        self.commit(patch, Commit::quiet("toggle_favorite").announce(message));
        added
    }

    /// Star or unstar a history or favorites entry, keeping its id.
    /// Returns `true` if it is now a favorite.
    ///
    /// # Errors
    ///
    /// [`StudioError::UnknownEntry`] if neither list holds `id`.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let entry = self.find_entry(id)?;
        Ok(self.toggle_favorite_entry(entry))
    }

    /// Star or unstar the live snapshot. Returns `true` if it is now a
    /// favorite.
    pub fn toggle_current_favorite(&mut self) -> bool {
        let entry = Entry::current(self.current.clone(), self.clock.now_ms());
        self.toggle_favorite_entry(entry)
    }

    #[must_use]
    pub fn is_current_favorite(&self) -> bool {
        self.favorites.contains(&self.current)
    }

    pub fn clear_history(&mut self) {
        let patch = Patch {
            history: Some(History::default()),
            ..Patch::default()
        };
        self.commit(patch, Commit::quiet("clear_history").announce("History cleared."));
    }

    pub fn clear_favorites(&mut self) {
        let patch = Patch {
            favorites: Some(Favorites::default()),
            ..Patch::default()
        };
        self.commit(patch, Commit::quiet("clear_favorites").announce("Favorites cleared."));
    }

    /// Case-insensitive filter over both lists.
    #[must_use]
    pub fn search<'a>(&'a self, query: &'a str) -> SearchResults<'a> {
        SearchResults {
            history: self.history.search(query).collect(),
            favorites: self.favorites.search(query).collect(),
        }
    }
}

/// Catalog lookup for manual font edits. Case-insensitive; returns the
/// canonical entry.
fn resolve_face(
    faces: &'static [FontFace],
    role: &'static str,
    name: &str,
) -> Result<&'static FontFace> {
    let needle = name.trim();
    faces
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(needle))
        .ok_or_else(|| StudioError::UnknownFont {
            role,
            name: name.to_owned(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
