//! Interactive catalog session.
//!
//! Reads intents from stdin and forwards them to the search session and the
//! sync engine. Searches settle after the debounce period; saves and deletes
//! run in the background and report back as notices, so the prompt never
//! waits on the network.

use super::intent::{Intent, HELP};
use super::render;
use gamedex_core::{Catalog, ExternalId};
use gamedex_search::{
    Debouncer, RawgClient, SearchConfig, SearchProvider, SearchQuery, SearchSession,
};
use gamedex_sync_engine::{
    CatalogTransport, DeleteOutcome, HttpTransport, SaveOutcome, SyncConfig, SyncEngine, SyncError,
};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// What the prompt should do after an intent.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print this text.
    Text(String),
    /// Nothing to print.
    Quiet,
    /// End the session.
    Quit,
}

/// Receivers the prompt loop listens on besides stdin.
pub struct Channels {
    /// Queries whose debounce period elapsed.
    pub settled: mpsc::UnboundedReceiver<SearchQuery>,
    /// Outcomes of background saves and deletes.
    pub notices: mpsc::UnboundedReceiver<String>,
}

/// Session state shared by every intent.
pub struct Session<P: SearchProvider, T: CatalogTransport + 'static> {
    engine: Arc<SyncEngine<T>>,
    search: SearchSession<P>,
    debouncer: Debouncer<SearchQuery>,
    notices: mpsc::UnboundedSender<String>,
    tasks: JoinSet<()>,
}

impl<P: SearchProvider, T: CatalogTransport + 'static> Session<P, T> {
    /// Creates a new session.
    pub fn new(
        engine: Arc<SyncEngine<T>>,
        search: SearchSession<P>,
        debounce: Duration,
    ) -> (Self, Channels) {
        let (debouncer, settled) = Debouncer::new(debounce);
        let (notices_tx, notices) = mpsc::unbounded_channel();
        let session = Self {
            engine,
            search,
            debouncer,
            notices: notices_tx,
            tasks: JoinSet::new(),
        };
        (session, Channels { settled, notices })
    }

    #[cfg(test)]
    fn engine(&self) -> &SyncEngine<T> {
        &self.engine
    }

    /// Handles one intent.
    pub fn handle(&mut self, intent: Intent) -> Reply {
        match intent {
            Intent::Search(text) => {
                self.search.set_text(text);
                if self.search.query().is_blank() {
                    self.debouncer.cancel();
                    self.search.clear();
                    return Reply::Quiet;
                }
                self.debouncer.submit(self.search.query());
                Reply::Quiet
            }
            Intent::NextPage => {
                self.search.next_page();
                self.debouncer.submit(self.search.query());
                Reply::Quiet
            }
            Intent::PreviousPage => {
                self.search.previous_page();
                self.debouncer.submit(self.search.query());
                Reply::Quiet
            }
            Intent::Add(n) => {
                let game = n
                    .checked_sub(1)
                    .and_then(|i| self.search.results().results.get(i))
                    .cloned();
                let Some(game) = game else {
                    return Reply::Text(format!("no search result {n}"));
                };
                if !self.engine.add(&game) {
                    return Reply::Quiet;
                }
                self.debouncer.cancel();
                self.search.clear();
                Reply::Text(format!("added {} [{}]", game.name, game.id.as_u64()))
            }
            Intent::List => Reply::Text(render::catalog(&self.engine.entries())),
            Intent::Describe(id, text) => staged(id, self.engine.stage_description(id, text)),
            Intent::Rate(id, rating) => staged(id, self.engine.stage_rating(id, rating)),
            Intent::Save(id) => {
                self.spawn_save(id);
                Reply::Quiet
            }
            Intent::Revert(id) => {
                self.spawn_revert(id);
                Reply::Quiet
            }
            Intent::Delete(id) => {
                self.spawn_delete(id);
                Reply::Quiet
            }
            Intent::Stats => Reply::Text(render::stats(&self.engine.stats())),
            Intent::Help => Reply::Text(HELP.to_string()),
            Intent::Quit => Reply::Quit,
        }
    }

    /// Fetches a settled query.
    ///
    /// Returns `None` if the query no longer matches what the user last asked
    /// for.
    pub async fn on_settled(&mut self, query: SearchQuery) -> Option<String> {
        if query != self.search.query() {
            tracing::debug!(query = %query.text, page = query.page, "dropping stale search");
            return None;
        }
        match self.search.fetch().await {
            Ok(page) => Some(render::search_page(page, query.page)),
            Err(err) => {
                tracing::warn!(error = %err, "search failed");
                Some(format!("search failed: {err}"))
            }
        }
    }

    /// Waits for every background request to finish.
    pub async fn finish(&mut self) {
        self.debouncer.cancel();
        while let Some(result) = self.tasks.join_next().await {
            if let Err(err) = result {
                tracing::warn!(error = %err, "background request aborted");
            }
        }
    }

    fn spawn_save(&mut self, id: ExternalId) {
        let engine = Arc::clone(&self.engine);
        let notices = self.notices.clone();
        self.tasks.spawn(async move {
            let notice = match engine.save(id).await {
                Ok(SaveOutcome::Created(remote_id)) => {
                    Some(format!("saved {} as #{remote_id}", id.as_u64()))
                }
                Ok(SaveOutcome::Updated) => Some(format!("updated {}", id.as_u64())),
                Ok(SaveOutcome::Unchanged) => None,
                Err(err) => failure_notice(id, "save", &err),
            };
            if let Some(notice) = notice {
                let _ = notices.send(notice);
            }
        });
    }

    fn spawn_revert(&mut self, id: ExternalId) {
        let engine = Arc::clone(&self.engine);
        let notices = self.notices.clone();
        self.tasks.spawn(async move {
            let notice = match engine.discard(id).await {
                Ok(()) => Some(format!("reverted {}", id.as_u64())),
                Err(err) if err.is_silent() => None,
                Err(err) => Some(err.to_string()),
            };
            if let Some(notice) = notice {
                let _ = notices.send(notice);
            }
        });
    }

    fn spawn_delete(&mut self, id: ExternalId) {
        let engine = Arc::clone(&self.engine);
        let notices = self.notices.clone();
        self.tasks.spawn(async move {
            let notice = match engine.delete(id).await {
                Ok(DeleteOutcome::Remote(remote_id)) => {
                    Some(format!("deleted {} (#{remote_id})", id.as_u64()))
                }
                Ok(DeleteOutcome::LocalOnly) => Some(format!("removed {}", id.as_u64())),
                Err(err) => failure_notice(id, "delete", &err),
            };
            if let Some(notice) = notice {
                let _ = notices.send(notice);
            }
        });
    }
}

fn staged(id: ExternalId, result: Result<(), SyncError>) -> Reply {
    match result {
        Ok(()) => Reply::Text(format!("staged, 'save {}' to persist", id.as_u64())),
        Err(err) if err.is_silent() => Reply::Quiet,
        Err(err) => Reply::Text(err.to_string()),
    }
}

fn failure_notice(id: ExternalId, action: &str, err: &SyncError) -> Option<String> {
    if err.is_silent() {
        return None;
    }
    if err.is_network_failure() {
        return Some(format!(
            "could not {action} {} ({err}), local entry kept, retry with '{action} {}'",
            id.as_u64(),
            id.as_u64()
        ));
    }
    Some(format!("{action} {} failed: {err}", id.as_u64()))
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Runs the interactive session until `quit` or end of input.
pub async fn run(
    search_config: SearchConfig,
    sync_config: SyncConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if search_config.api_key.is_none() {
        tracing::warn!("no RAWG api key configured, searches will fail");
    }

    let provider = RawgClient::new(&search_config)?;
    let transport = HttpTransport::new(&sync_config)?;
    tracing::info!(server = %transport.base_url(), "catalog service");

    let engine = Arc::new(SyncEngine::new(sync_config, transport, Catalog::shared()));
    let search = SearchSession::new(provider, search_config.page_size);
    let (mut session, mut channels) = Session::new(engine, search, search_config.debounce);

    println!("GameDex v{}, type 'help' for commands", env!("CARGO_PKG_VERSION"));
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Intent::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(intent)) => match session.handle(intent) {
                        Reply::Text(text) => println!("{text}"),
                        Reply::Quiet => {}
                        Reply::Quit => break,
                    },
                    Err(err) => println!("{err}"),
                }
                prompt();
            }
            Some(query) = channels.settled.recv() => {
                if let Some(text) = session.on_settled(query).await {
                    println!("\n{text}");
                    prompt();
                }
            }
            Some(notice) = channels.notices.recv() => {
                println!("\n{notice}");
                prompt();
            }
            Some(result) = session.tasks.join_next() => {
                if let Err(err) = result {
                    tracing::warn!(error = %err, "background request aborted");
                }
            }
        }
    }

    session.finish().await;
    while let Ok(notice) = channels.notices.try_recv() {
        println!("{notice}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gamedex_core::{GameSummary, Rating, RemoteId};
    use gamedex_search::{SearchPage, SearchResult};
    use gamedex_sync_engine::{MockTransport, TransportCall};

    struct StaticProvider;

    #[async_trait]
    impl SearchProvider for StaticProvider {
        async fn search(&self, query: &SearchQuery) -> SearchResult<SearchPage> {
            Ok(SearchPage {
                results: vec![
                    GameSummary::new(42, format!("{} p{}", query.text, query.page), None),
                    GameSummary::new(43, "Other", Some("https://media.example/43.jpg".into())),
                ],
                count: Some(2),
                has_next: false,
                has_previous: query.page > 1,
            })
        }
    }

    fn session() -> (Session<StaticProvider, MockTransport>, Channels) {
        let engine = Arc::new(SyncEngine::new(
            SyncConfig::default(),
            MockTransport::new(),
            Catalog::shared(),
        ));
        Session::new(
            engine,
            SearchSession::new(StaticProvider, 5),
            Duration::from_millis(500),
        )
    }

    async fn search_and_add(
        session: &mut Session<StaticProvider, MockTransport>,
        channels: &mut Channels,
    ) {
        session.handle(Intent::Search("zelda".into()));
        let query = channels.settled.recv().await.unwrap();
        let text = session.on_settled(query).await.unwrap();
        assert!(text.contains("1. zelda p1 [rawg:42]"));
        assert_eq!(
            session.handle(Intent::Add(1)),
            Reply::Text("added zelda p1 [42]".into())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn search_settles_then_adds() {
        let (mut session, mut channels) = session();
        search_and_add(&mut session, &mut channels).await;

        let entries = session.engine().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].external_id(), ExternalId::new(42));

        // Adding clears the preview
        assert_eq!(
            session.handle(Intent::Add(1)),
            Reply::Text("no search result 1".into())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stale_query_is_dropped() {
        let (mut session, _channels) = session();
        session.handle(Intent::Search("zel".into()));
        let stale = SearchQuery::new("zel", 5);
        session.handle(Intent::Search("zelda".into()));
        assert_eq!(session.on_settled(stale).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_add_is_quiet() {
        let (mut session, mut channels) = session();
        search_and_add(&mut session, &mut channels).await;

        session.handle(Intent::Search("zelda".into()));
        let query = channels.settled.recv().await.unwrap();
        session.on_settled(query).await.unwrap();
        assert_eq!(session.handle(Intent::Add(1)), Reply::Quiet);
        assert_eq!(session.engine().entries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn edits_save_in_background() {
        let (mut session, mut channels) = session();
        search_and_add(&mut session, &mut channels).await;
        let id = ExternalId::new(42);

        session.handle(Intent::Describe(id, "Great game".into()));
        session.handle(Intent::Rate(id, Rating::from_stars(4).unwrap()));
        assert_eq!(session.handle(Intent::Save(id)), Reply::Quiet);

        assert_eq!(channels.notices.recv().await.unwrap(), "saved 42 as #1");
        let entry = session.engine().entry(id).unwrap();
        assert_eq!(entry.remote_id(), Some(RemoteId(1)));
        assert_eq!(entry.description(), "Great game");
        assert_eq!(entry.rating().stars(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_save_keeps_staged_edit() {
        let (mut session, mut channels) = session();
        search_and_add(&mut session, &mut channels).await;
        let id = ExternalId::new(42);

        session.engine().transport().set_failing(true);
        session.handle(Intent::Rate(id, Rating::from_stars(2).unwrap()));
        session.handle(Intent::Save(id));

        let notice = channels.notices.recv().await.unwrap();
        assert!(notice.starts_with("could not save 42"));
        assert!(notice.ends_with("retry with 'save 42'"));
        let entry = session.engine().entry(id).unwrap();
        assert_eq!(entry.remote_id(), None);
        assert!(entry.has_pending_edits());
        assert_eq!(entry.rating(), Rating::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn revert_drops_unsaved_rating() {
        let (mut session, mut channels) = session();
        search_and_add(&mut session, &mut channels).await;
        let id = ExternalId::new(42);

        session.handle(Intent::Rate(id, Rating::from_stars(5).unwrap()));
        session.handle(Intent::Revert(id));
        assert_eq!(channels.notices.recv().await.unwrap(), "reverted 42");

        let entry = session.engine().entry(id).unwrap();
        assert!(!entry.has_pending_edits());
        session.handle(Intent::Save(id));
        session.finish().await;
        assert!(session.engine().transport().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unsaved_entry_deletes_locally() {
        let (mut session, mut channels) = session();
        search_and_add(&mut session, &mut channels).await;

        session.handle(Intent::Delete(ExternalId::new(42)));
        assert_eq!(channels.notices.recv().await.unwrap(), "removed 42");
        assert!(session.engine().entries().is_empty());
        assert!(session.engine().transport().calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_entry_is_silent() {
        let (mut session, mut channels) = session();
        let id = ExternalId::new(7);

        assert_eq!(session.handle(Intent::Rate(id, Rating::ZERO)), Reply::Quiet);
        session.handle(Intent::Save(id));
        session.finish().await;
        assert!(channels.notices.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn finish_waits_for_saves() {
        let (mut session, mut channels) = session();
        search_and_add(&mut session, &mut channels).await;
        let id = ExternalId::new(42);
        session.engine().transport().set_latency(Duration::from_secs(1));

        session.handle(Intent::Describe(id, "Later".into()));
        session.handle(Intent::Save(id));
        session.finish().await;

        assert_eq!(channels.notices.try_recv().unwrap(), "saved 42 as #1");
        let calls = session.engine().transport().calls();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], TransportCall::Create(_)));
        assert_eq!(session.handle(Intent::Quit), Reply::Quit);
    }
}
