//! Effect runner
//!
//! Performs the effects the app asks for on the tokio runtime and reports
//! each result back as a `Completion` on the app's channel.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::api::TmdbClient;
use crate::app::{Completion, Effect};
use crate::debounce::Debouncer;
use crate::player::LocalPlayer;

/// Runs effects; owns the search debouncer
#[derive(Debug)]
pub struct EffectRunner {
    client: TmdbClient,
    player: LocalPlayer,
    tx: UnboundedSender<Completion>,
    debouncer: Debouncer<Completion>,
}

impl EffectRunner {
    pub fn new(
        client: TmdbClient,
        player: LocalPlayer,
        debounce: Duration,
        tx: UnboundedSender<Completion>,
    ) -> Self {
        let debouncer = Debouncer::new(debounce, tx.clone());
        Self {
            client,
            player,
            tx,
            debouncer,
        }
    }

    /// A debounced query is waiting to be committed
    pub fn query_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn run_all(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    /// Start one effect. Must be called from within a tokio runtime.
    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleQuery(query) => {
                self.debouncer.schedule(Completion::QueryCommitted(query));
            }
            Effect::CancelScheduledQuery => self.debouncer.cancel(),
            Effect::FetchPage(request) => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.search_movies(&request.query, request.page).await;
                    let _ = tx.send(Completion::PageLoaded(request, result));
                });
            }
            Effect::FetchTrailer(request) => {
                let client = self.client.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = client.movie_videos(request.movie_id).await;
                    let _ = tx.send(Completion::TrailerLoaded(request, result));
                });
            }
            Effect::PlayTrailer(url) => {
                tracing::info!(player = %self.player.player_type(), "starting trailer playback");
                let launched = self.player.play(&url);
                self.watch_child(launched);
            }
            Effect::OpenInBrowser(url) => {
                tracing::info!("opening trailer in browser");
                let launched = LocalPlayer::open_in_browser(&url);
                self.watch_child(launched);
            }
        }
    }

    /// Reap a launched player, or report why it didn't start
    fn watch_child(
        &self,
        launched: Result<tokio::process::Child, crate::player::PlayerError>,
    ) {
        match launched {
            Ok(mut child) => {
                tokio::spawn(async move {
                    match child.wait().await {
                        Ok(status) => tracing::debug!(%status, "player exited"),
                        Err(e) => tracing::warn!(error = %e, "waiting on player failed"),
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "player failed to start");
                let _ = self.tx.send(Completion::PlaybackFailed(e.to_string()));
            }
        }
    }
}
