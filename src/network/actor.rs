//! Network actor - runs HTTP requests in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, fetch_timetable, search_schools};

/// Network actor that processes search and timetable commands
pub struct NetworkActor {
    client: reqwest::Client,
    base_url: String,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(config: &Config, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(config.http_timeout_seconds),
            base_url: config.api_base_url.clone(),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Search { id, query }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, query = %query, "Searching schools");
                                let result = search_schools(&client, &base_url, query, id).await;
                                tracing::info!(id, "Search completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::FetchTimetable { id, query }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(
                                    id,
                                    school_code = %query.school_code,
                                    date = %query.date,
                                    "Fetching timetable"
                                );
                                let result = fetch_timetable(&client, &base_url, query, id).await;
                                tracing::info!(id, "Timetable fetch completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        // Pending tasks are dropped with the JoinSet; their
                        // responses are simply discarded
                        Some(NetworkCommand::Shutdown) => break,

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
