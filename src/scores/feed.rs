use super::protocol::ScoreSubmission;
use super::{ScoreClient, ScoreEvent, Scoreboard};
use std::sync::mpsc::{channel, Receiver, Sender};
use tokio::runtime::Handle;

/// A [`Scoreboard`] that performs each request as a task on a tokio runtime
/// and reports back through a channel, which the UI thread drains between
/// frames
#[derive(Debug)]
pub(crate) struct ScoreFeed {
    client: ScoreClient,
    handle: Handle,
    events: Sender<ScoreEvent>,
}

impl ScoreFeed {
    pub(crate) fn new(client: ScoreClient, handle: Handle) -> (ScoreFeed, Receiver<ScoreEvent>) {
        let (events, receiver) = channel();
        (
            ScoreFeed {
                client,
                handle,
                events,
            },
            receiver,
        )
    }
}

impl Scoreboard for ScoreFeed {
    fn submit(&mut self, submission: ScoreSubmission) {
        let client = self.client.clone();
        let events = self.events.clone();
        self.handle.spawn(async move {
            let r = client.submit(&submission).await;
            // The receiver only goes away when the game is shutting down.
            if events.send(ScoreEvent::Submitted(r)).is_ok() {
                let _ = events.send(ScoreEvent::Leaderboard(client.leaderboard().await));
            }
        });
    }

    fn refresh(&mut self) {
        let client = self.client.clone();
        let events = self.events.clone();
        self.handle.spawn(async move {
            let _ = events.send(ScoreEvent::Leaderboard(client.leaderboard().await));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::protocol::LeaderboardEntry;
    use crate::server::spawn_test_server;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(10);

    #[test]
    fn submit_then_ranking() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let base = rt.block_on(spawn_test_server());
        let client = ScoreClient::new(&base, None).unwrap();
        let (mut feed, events) = ScoreFeed::new(client, rt.handle().clone());

        feed.refresh();
        match events.recv_timeout(WAIT).unwrap() {
            ScoreEvent::Leaderboard(Ok(entries)) => assert!(entries.is_empty()),
            other => panic!("Unexpected event: {other:?}"),
        }

        feed.submit(ScoreSubmission {
            name: String::from("alice"),
            score: 500,
        });
        assert!(matches!(
            events.recv_timeout(WAIT).unwrap(),
            ScoreEvent::Submitted(Ok(()))
        ));
        match events.recv_timeout(WAIT).unwrap() {
            ScoreEvent::Leaderboard(Ok(entries)) => assert_eq!(
                entries,
                [LeaderboardEntry {
                    player_name: String::from("alice"),
                    score: 500
                }]
            ),
            other => panic!("Unexpected event: {other:?}"),
        }
    }

    #[test]
    fn failed_submission_still_refreshes() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let base = rt.block_on(spawn_test_server());
        let client = ScoreClient::new(&base, None).unwrap();
        let (mut feed, events) = ScoreFeed::new(client, rt.handle().clone());
        feed.submit(ScoreSubmission {
            name: String::new(),
            score: 500,
        });
        assert!(matches!(
            events.recv_timeout(WAIT).unwrap(),
            ScoreEvent::Submitted(Err(_))
        ));
        assert!(matches!(
            events.recv_timeout(WAIT).unwrap(),
            ScoreEvent::Leaderboard(Ok(_))
        ));
    }
}
