//! Command-line configuration for the two binaries.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::game::{FirstLegalMoveSelector, MoveSelector, RandomMoveSelector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Uniform choice among the legal moves
    Random,
    /// First legal move in row-major order
    First,
}

/// Serve "pick a move for this board" over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "othello-server", version)]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    #[arg(long, value_enum, default_value_t = Strategy::Random)]
    pub strategy: Strategy,

    /// Seed for the random strategy; omitted means seeded from the OS
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ServerArgs {
    pub fn selector(&self) -> Arc<dyn MoveSelector> {
        match (self.strategy, self.seed) {
            (Strategy::First, _) => Arc::new(FirstLegalMoveSelector),
            (Strategy::Random, Some(seed)) => Arc::new(RandomMoveSelector::new(seed)),
            (Strategy::Random, None) => Arc::new(RandomMoveSelector::from_entropy()),
        }
    }
}

/// Attach a locally running Othello bot to a remote match server.
///
/// All of these start playing game "foo" as white using the player key "bar":
///
///   reflector --gamekey=foo --whitekey=bar
///   reflector "http://step-reversi.appspot.com/view?gamekey=foo&whitekey=bar"
///   reflector --whitekey=bar http://step-reversi.appspot.com/view?gamekey=foo
///
/// Quote the full URL so the shell does not interpret the `&`.
#[derive(Debug, Clone, Parser)]
#[command(name = "reflector", version, verbatim_doc_comment)]
pub struct ReflectorArgs {
    /// Game to get state from and send moves to
    #[arg(long, default_value = "")]
    pub gamekey: String,

    /// Player key for white; required to reflect moves as white
    #[arg(long, default_value = "")]
    pub whitekey: String,

    /// Player key for black; required to reflect moves as black
    #[arg(long, default_value = "")]
    pub blackkey: String,

    /// Service asked for moves
    #[arg(long, default_value = "http://localhost:8080")]
    pub bot: String,

    /// Match server used for sending and receiving game state
    #[arg(long, default_value = "https://step-reversi.appspot.com")]
    pub server: String,

    /// Delay between polls while waiting for the opponent
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
    pub poll_interval: Duration,

    /// Give up when the opponent has not moved for this long
    #[arg(long, default_value = "1h", value_parser = humantime::parse_duration)]
    pub turn_timeout: Duration,

    /// Stop after this many of our own turns
    #[arg(long, default_value_t = 150)]
    pub max_turns: u32,

    /// Game viewer URL; its `gamekey`, `whitekey`, `blackkey` and `bot` query
    /// parameters override the matching flags, and its host replaces `--server`
    pub view_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let args = ServerArgs::parse_from(["othello-server"]);

        assert_eq!(args.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(args.strategy, Strategy::Random);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn server_strategy_and_seed_flags() {
        let args =
            ServerArgs::parse_from(["othello-server", "--strategy", "first", "--seed", "9"]);

        assert_eq!(args.strategy, Strategy::First);
        assert_eq!(args.seed, Some(9));
    }

    #[test]
    fn reflector_defaults_and_durations() {
        let args = ReflectorArgs::parse_from([
            "reflector",
            "--whitekey=bar",
            "--poll-interval=250ms",
            "http://example.com/view?gamekey=foo",
        ]);

        assert_eq!(args.whitekey, "bar");
        assert_eq!(args.blackkey, "");
        assert_eq!(args.bot, "http://localhost:8080");
        assert_eq!(args.poll_interval, Duration::from_millis(250));
        assert_eq!(args.turn_timeout, Duration::from_secs(3600));
        assert_eq!(args.max_turns, 150);
        assert_eq!(
            args.view_url.as_deref(),
            Some("http://example.com/view?gamekey=foo")
        );
    }
}
