//! Engine context
//!
//! Process-scoped context tying the list controller and the feed aggregator
//! together, with an explicit start/stop lifecycle instead of ambient
//! globals. While started, a background loop re-pulls the records on an
//! interval so the screen converges after out-of-band edits.

use log::{error, info};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, RecordSource};
use crate::config::EngineConfig;
use crate::error::AppResult;
use crate::events::EngineEvent;
use crate::feed::FeedBuilder;
use crate::list::ListEngine;

pub struct Engine {
    pub list: Arc<ListEngine>,
    pub feed: Arc<FeedBuilder>,
    config: EngineConfig,
    shutdown: CancellationToken,
    events: Option<mpsc::Sender<EngineEvent>>,
}

impl Engine {
    pub fn new(
        source: Arc<dyn RecordSource>,
        config: EngineConfig,
        events: Option<mpsc::Sender<EngineEvent>>,
    ) -> AppResult<Self> {
        config.validate()?;

        let list = Arc::new(ListEngine::new(source.clone(), &config, events.clone()));
        let feed = Arc::new(FeedBuilder::new(source, config.feed_fan_out));

        Ok(Self {
            list,
            feed,
            config,
            shutdown: CancellationToken::new(),
            events,
        })
    }

    /// Convenience constructor wiring the HTTP record source from the
    /// environment.
    pub fn from_env(events: Option<mpsc::Sender<EngineEvent>>) -> AppResult<Self> {
        let config = EngineConfig::from_env();
        let client = ApiClient::new(&config.api_base, config.auth_token.clone())?;
        Self::new(Arc::new(client), config, events)
    }

    /// Spawn the background refresh loop. One pass runs immediately so the
    /// screen has data as soon as it mounts.
    pub fn start(&self) {
        let list = self.list.clone();
        let feed = self.feed.clone();
        let events = self.events.clone();
        let fan_out = self.config.feed_fan_out;
        let interval = self.config.refresh_interval;
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            info!("Starting records refresh loop");
            loop {
                if shutdown.is_cancelled() {
                    break;
                }

                if let Err(e) = refresh_pass(&list, &feed, fan_out, &events).await {
                    error!("Records refresh pass failed: {}", e);
                }

                tokio::select! {
                    _ = sleep(interval) => {}
                    _ = shutdown.cancelled() => break,
                }
            }
            info!("Records refresh loop stopped");
        });
    }

    /// Stop the background loop and drop every pending scheduled trigger.
    pub fn stop(&self) {
        info!("Stopping engine");
        self.shutdown.cancel();
        self.list.cancel_pending();
    }

    /// Records-changed signal from the CRUD screens: invalidate the cached
    /// copy and rebuild both the list and the feed right away.
    pub async fn notify_records_changed(&self) -> AppResult<()> {
        refresh_pass(
            &self.list,
            &self.feed,
            self.config.feed_fan_out,
            &self.events,
        )
        .await
    }
}

async fn refresh_pass(
    list: &Arc<ListEngine>,
    feed: &Arc<FeedBuilder>,
    fan_out: usize,
    events: &Option<mpsc::Sender<EngineEvent>>,
) -> AppResult<()> {
    list.refresh().await?;

    let parents = list.loaded_parents(fan_out).await;
    let outcome = feed.build_feed(&parents).await;

    if let Some(tx) = events {
        let _ = tx
            .send(EngineEvent::FeedRebuilt {
                entries: feed.feed().await,
                failed_parents: outcome.failed_parents,
            })
            .await;
    }

    Ok(())
}
