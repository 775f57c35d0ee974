use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

/// Receives the final score of a safe landing.
pub trait LandingReporter {
    fn report_successful_landing(&mut self, final_score: f64);
}

impl<F: FnMut(f64)> LandingReporter for F {
    fn report_successful_landing(&mut self, final_score: f64) {
        self(final_score)
    }
}

/// Forwards landing scores across a channel. Fire-and-forget: a dropped
/// receiver is not the simulation's problem.
#[derive(Clone)]
pub struct ScoreSender(pub Sender<f64>);

impl LandingReporter for ScoreSender {
    fn report_successful_landing(&mut self, final_score: f64) {
        if self.0.send(final_score).is_err() {
            debug!("score receiver gone, dropping {final_score}");
        }
    }
}

// Both ends live in one resource; the simulation sends, the HUD side drains.
#[derive(Resource)]
pub struct ScoreChannel {
    pub sender: ScoreSender,
    pub receiver: Receiver<f64>,
}

impl ScoreChannel {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            sender: ScoreSender(tx),
            receiver: rx,
        }
    }
}

impl Default for ScoreChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores for the current session only. Nothing here is written to disk.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct Scoreboard {
    pub last: Option<f64>,
    pub best: Option<f64>,
    pub landings: usize,
}

impl LandingReporter for Scoreboard {
    fn report_successful_landing(&mut self, final_score: f64) {
        self.last = Some(final_score);
        self.best = Some(self.best.map_or(final_score, |best| best.max(final_score)));
        self.landings += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_reporters() {
        let mut seen = Vec::new();
        let mut reporter = |score: f64| seen.push(score);
        reporter.report_successful_landing(42.0);
        assert_eq!(seen, vec![42.0]);
    }

    #[test]
    fn scoreboard_keeps_last_and_best() {
        let mut board = Scoreboard::default();
        board.report_successful_landing(150.0);
        board.report_successful_landing(90.0);
        assert_eq!(board.last, Some(90.0));
        assert_eq!(board.best, Some(150.0));
        assert_eq!(board.landings, 2);
    }

    #[test]
    fn channel_delivers_scores_in_order() {
        let mut channel = ScoreChannel::new();
        channel.sender.report_successful_landing(1.0);
        channel.sender.report_successful_landing(2.0);
        let received: Vec<f64> = channel.receiver.try_iter().collect();
        assert_eq!(received, vec![1.0, 2.0]);
    }

    #[test]
    fn sending_without_receiver_is_harmless() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut sender = ScoreSender(tx);
        sender.report_successful_landing(10.0);
    }
}
