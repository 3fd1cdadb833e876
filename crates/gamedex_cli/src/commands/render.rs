//! Text rendering of search results and catalog entries.

use gamedex_core::CatalogEntry;
use gamedex_search::SearchPage;
use gamedex_sync_engine::SyncStats;
use std::fmt::Write;

/// Renders a page of search results, numbered from 1 for `add <n>`.
pub fn search_page(page: &SearchPage, page_no: u32) -> String {
    if page.is_empty() {
        return "no results".to_string();
    }

    let mut out = String::new();
    for (i, game) in page.results.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {} [{}]", i + 1, game.name, game.id);
    }
    let _ = write!(out, "page {page_no}");
    if let Some(count) = page.count {
        let _ = write!(out, " of {count} matches");
    }
    match (page.has_previous, page.has_next) {
        (true, true) => out.push_str(" (prev/next)"),
        (true, false) => out.push_str(" (prev)"),
        (false, true) => out.push_str(" (next)"),
        (false, false) => {}
    }
    out
}

/// Renders one catalog entry on a single line.
pub fn entry(entry: &CatalogEntry) -> String {
    let mut out = format!(
        "{:>8}  {}  {}  [{}]",
        entry.external_id().as_u64(),
        entry.rating(),
        entry.name(),
        entry.sync_state()
    );
    if let Some(remote_id) = entry.remote_id() {
        let _ = write!(out, " #{remote_id}");
    }
    if entry.sync_state().is_active() {
        out.push_str(" ...");
    }
    if let Some(staged) = entry.staged() {
        let _ = write!(out, " *unsaved {}", staged.draft.rating);
    }
    if !entry.description().is_empty() {
        let _ = write!(out, "\n          {}", entry.description());
    }
    out
}

/// Renders the whole catalog.
pub fn catalog(entries: &[CatalogEntry]) -> String {
    if entries.is_empty() {
        return "catalog is empty".to_string();
    }
    entries.iter().map(entry).collect::<Vec<_>>().join("\n")
}

/// Renders sync statistics.
pub fn stats(stats: &SyncStats) -> String {
    let mut out = format!(
        "creates: {}  updates: {}  deletes: {}  failures: {}",
        stats.creates, stats.updates, stats.deletes, stats.failures
    );
    if let Some(at) = stats.last_sync_time {
        let _ = write!(out, "\nlast sync: {}s ago", at.elapsed().as_secs());
    }
    if let Some(err) = &stats.last_error {
        let _ = write!(out, "\nlast error: {err}");
    }
    out
}
