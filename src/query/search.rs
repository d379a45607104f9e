// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use crate::model::{Catalog, Item, RangeError};

/// Quiet period between the last keystroke and query evaluation.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Rows currently shown, as catalog positions in catalog order.
///
/// `None` means no filter: every catalog item is visible. A filter that matched nothing is an
/// empty list and shows nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    filter: Option<Vec<usize>>,
}

impl SearchView {
    pub fn all() -> Self {
        Self { filter: None }
    }

    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    pub fn len(&self, catalog: &Catalog) -> usize {
        self.positions(catalog.len()).count()
    }

    pub fn is_empty(&self, catalog: &Catalog) -> bool {
        self.len(catalog) == 0
    }

    /// Visible catalog positions in display order. Positions at or past `catalog_len` are skipped.
    pub fn positions(&self, catalog_len: usize) -> impl Iterator<Item = usize> + '_ {
        let filtered = self
            .filter
            .as_deref()
            .map(|positions| positions.iter().copied().filter(move |p| *p < catalog_len));
        let unfiltered = match self.filter {
            Some(_) => None,
            None => Some(0..catalog_len),
        };
        filtered
            .into_iter()
            .flatten()
            .chain(unfiltered.into_iter().flatten())
    }

    pub fn items<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Item> + 'a {
        self.positions(catalog.len())
            .filter_map(|position| catalog.get(position))
    }

    pub fn catalog_position(&self, row: usize, catalog: &Catalog) -> Option<usize> {
        self.positions(catalog.len()).nth(row)
    }

    /// Maps a drag from view row `from_row` to view row `to_row` onto catalog positions.
    ///
    /// The dragged item takes the catalog position of the item currently shown at `to_row`.
    /// Unfiltered views map rows to positions one to one.
    pub fn resolve_move(
        &self,
        catalog: &Catalog,
        from_row: usize,
        to_row: usize,
    ) -> Result<(usize, usize), RangeError> {
        let rows = self.positions(catalog.len()).collect::<Vec<_>>();
        RangeError::check(from_row, to_row, rows.len())?;
        Ok((rows[from_row], rows[to_row]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoKey {
    query_lower: String,
    catalog_rev: u64,
}

/// Debounced, memoized query evaluation for an interactive search box.
///
/// Time is passed in by the caller, so the session never sleeps or spawns; the event loop polls
/// it with the current instant.
#[derive(Debug, Clone)]
pub struct SearchSession {
    debounce: Duration,
    query: String,
    pending_since: Option<Instant>,
    memo: Option<MemoKey>,
    view: SearchView,
    evaluations: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce,
            query: String::new(),
            pending_since: None,
            memo: None,
            view: SearchView::all(),
            evaluations: 0,
        }
    }

    /// Records the raw query and restarts the quiet period from `now`.
    pub fn on_query_changed(&mut self, raw: impl Into<String>, now: Instant) {
        self.query = raw.into();
        self.pending_since = Some(now);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// When the pending evaluation becomes due, if any.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending_since.map(|since| since + self.debounce)
    }

    /// Evaluates the pending query once its quiet period has elapsed.
    ///
    /// Returns the fresh view, or `None` when nothing was due.
    pub fn poll(&mut self, catalog: &Catalog, now: Instant) -> Option<&SearchView> {
        let due = self.due_at()?;
        if now < due {
            return None;
        }
        Some(self.evaluate(catalog))
    }

    /// Evaluates the current query immediately, cancelling any pending evaluation.
    ///
    /// The same lowercased query against an unchanged catalog returns the previous view as is.
    /// Catalog revs are process-unique, so handing in a different catalog always re-evaluates.
    pub fn evaluate(&mut self, catalog: &Catalog) -> &SearchView {
        self.pending_since = None;

        let key = MemoKey {
            query_lower: self.query.to_lowercase(),
            catalog_rev: catalog.rev(),
        };
        if self.memo.as_ref() == Some(&key) {
            tracing::debug!(query = %key.query_lower, "reused previous search result");
            return &self.view;
        }

        self.view = if key.query_lower.is_empty() {
            SearchView::all()
        } else {
            let hits = catalog.search(&key.query_lower);
            let positions = (0..catalog.len())
                .filter(|position| hits.contains(position))
                .collect::<Vec<_>>();
            tracing::debug!(
                query = %key.query_lower,
                hits = positions.len(),
                "evaluated search"
            );
            SearchView {
                filter: Some(positions),
            }
        };
        self.evaluations += 1;
        self.memo = Some(key);
        &self.view
    }

    /// The most recently evaluated view.
    pub fn view(&self) -> &SearchView {
        &self.view
    }

    /// Evaluations that actually ran a search (memo hits excluded).
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Forgets the memo so the next evaluation runs a fresh search.
    pub fn invalidate(&mut self) {
        self.memo = None;
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rstest::{fixture, rstest};

    use super::{SearchSession, SearchView};
    use crate::model::{Catalog, Item, RangeError};

    #[fixture]
    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.replace_all(
            [
                ("VT001", "Bearing 6204"),
                ("A1", "Bolt"),
                ("B2", "Nut"),
                ("VT002", "Bearing cap"),
                ("C3", "Washer"),
            ]
            .into_iter()
            .map(|(code, name)| Item::new(code, name).expect("item")),
        );
        catalog
    }

    fn codes<'a>(view: &'a SearchView, catalog: &'a Catalog) -> Vec<&'a str> {
        view.items(catalog).map(Item::code).collect()
    }

    #[rstest]
    fn evaluation_waits_for_quiet_period(catalog: Catalog) {
        let start = Instant::now();
        let mut session = SearchSession::with_debounce(Duration::from_millis(300));

        session.on_query_changed("b", start);
        session.on_query_changed("be", start + Duration::from_millis(200));
        assert!(session
            .poll(&catalog, start + Duration::from_millis(400))
            .is_none());
        assert_eq!(session.evaluations(), 0);

        let view = session
            .poll(&catalog, start + Duration::from_millis(500))
            .expect("due")
            .clone();
        assert_eq!(codes(&view, &catalog), ["VT001", "VT002"]);
        assert!(!session.is_pending());
        assert_eq!(session.evaluations(), 1);
        assert!(session
            .poll(&catalog, start + Duration::from_secs(5))
            .is_none());
    }

    #[rstest]
    fn filtered_result_preserves_catalog_order(mut catalog: Catalog) {
        let mut session = SearchSession::new();
        session.on_query_changed("bearing", Instant::now());
        let view = session.evaluate(&catalog).clone();
        assert_eq!(codes(&view, &catalog), ["VT001", "VT002"]);

        catalog.move_to(3, 0).unwrap();
        let view = session.evaluate(&catalog).clone();
        assert_eq!(codes(&view, &catalog), ["VT002", "VT001"]);
    }

    #[rstest]
    fn repeated_query_reuses_previous_result(catalog: Catalog) {
        let now = Instant::now();
        let mut session = SearchSession::new();
        session.on_query_changed("Nut", now);
        session.evaluate(&catalog);
        session.on_query_changed("NUT", now);
        session.evaluate(&catalog);
        assert_eq!(session.evaluations(), 1);

        session.invalidate();
        session.evaluate(&catalog);
        assert_eq!(session.evaluations(), 2);
    }

    #[rstest]
    fn catalog_edit_invalidates_memo(mut catalog: Catalog) {
        let mut session = SearchSession::new();
        session.on_query_changed("nut", Instant::now());
        assert_eq!(codes(&session.evaluate(&catalog).clone(), &catalog), ["B2"]);

        catalog.edit(2, "B2", "Lock washer").unwrap();
        let view = session.evaluate(&catalog).clone();
        assert!(view.is_empty(&catalog));
        assert_eq!(session.evaluations(), 2);
    }

    #[rstest]
    fn reloaded_catalog_is_searched_again(catalog: Catalog) {
        let mut session = SearchSession::new();
        session.on_query_changed("bearing", Instant::now());
        assert_eq!(codes(&session.evaluate(&catalog).clone(), &catalog), ["VT001", "VT002"]);

        let mut reloaded = Catalog::new();
        reloaded.replace_all(
            [("VT002", "Bearing cap"), ("A1", "Bolt"), ("VT001", "Bearing 6204")]
                .into_iter()
                .map(|(code, name)| Item::new(code, name).expect("item")),
        );
        let view = session.evaluate(&reloaded).clone();
        assert_eq!(codes(&view, &reloaded), ["VT002", "VT001"]);
        assert_eq!(view.catalog_position(1, &reloaded), Some(2));
        assert_eq!(session.evaluations(), 2);
    }

    #[rstest]
    fn empty_query_clears_filter(catalog: Catalog) {
        let mut session = SearchSession::new();
        session.on_query_changed("bolt", Instant::now());
        assert!(session.evaluate(&catalog).is_filtered());

        session.on_query_changed("", Instant::now());
        let view = session.evaluate(&catalog);
        assert!(!view.is_filtered());
        assert_eq!(view.len(&catalog), 5);
    }

    #[rstest]
    #[case("1", &["VT001", "A1"])]
    #[case("t001", &["VT001"])]
    #[case("zzz", &[])]
    fn query_cases(catalog: Catalog, #[case] query: &str, #[case] expected: &[&str]) {
        let mut session = SearchSession::new();
        session.on_query_changed(query, Instant::now());
        let view = session.evaluate(&catalog).clone();
        assert_eq!(codes(&view, &catalog), expected);
    }

    #[rstest]
    fn resolve_move_maps_filtered_rows(catalog: Catalog) {
        let mut session = SearchSession::new();
        session.on_query_changed("bearing", Instant::now());
        let view = session.evaluate(&catalog).clone();

        assert_eq!(view.resolve_move(&catalog, 1, 0), Ok((3, 0)));
        assert_eq!(
            view.resolve_move(&catalog, 0, 2),
            Err(RangeError { from: 0, to: 2, len: 2 })
        );
        assert_eq!(SearchView::all().resolve_move(&catalog, 4, 1), Ok((4, 1)));
    }
}
