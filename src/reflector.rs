//! Bridges a remote match server and a locally running bot.
//!
//! The reflector polls the match server for the game state, and whenever it
//! is the turn of a colour we hold a player key for, it forwards the state to
//! the bot and relays the bot's answer back to the server.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;
use web_time::Instant;

use crate::board::Board;
use crate::config::ReflectorArgs;
use crate::error::ReplyParseError;
use crate::game::Reply;
use crate::types::{MatchOutcome, Piece};
use crate::wire::MatchState;

#[derive(Error, Debug)]
pub enum ReflectorError {
    #[error("need a gamekey and at least one player key")]
    MissingKeys,

    #[error("bad URL {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse json ({body:?}): {source}")]
    Json {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("bot replied with an unusable move: {0}")]
    BadReply(#[from] ReplyParseError),

    #[error("opponent hasn't moved in {0:?}. giving up.")]
    TurnTimeout(Duration),
}

/// How a reflector run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    GameOver(MatchOutcome),
    TurnLimit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerKeys {
    pub game: String,
    pub white: String,
    pub black: String,
}

impl PlayerKeys {
    /// Whether we hold the key needed to move as `color`.
    pub fn plays(&self, color: Piece) -> bool {
        match color {
            Piece::White => !self.white.is_empty(),
            Piece::Black => !self.black.is_empty(),
            Piece::Empty => false,
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("gamekey", self.game.as_str())];
        if !self.white.is_empty() {
            pairs.push(("whitekey", self.white.as_str()));
        }
        if !self.black.is_empty() {
            pairs.push(("blackkey", self.black.as_str()));
        }
        pairs
    }
}

enum Turn {
    Ours { js: String, board: Board },
    Over(MatchOutcome),
}

enum Polled {
    State { js: String, state: MatchState },
    Finished(MatchOutcome),
}

#[derive(Deserialize)]
struct WinnerOnly {
    #[serde(default, alias = "Winner")]
    winner: MatchOutcome,
}

pub struct Reflector {
    client: Client,
    base: Url,
    bot: Url,
    keys: PlayerKeys,
    poll_interval: Duration,
    turn_timeout: Duration,
    max_turns: u32,
}

impl Reflector {
    pub fn from_args(args: ReflectorArgs) -> Result<Self, ReflectorError> {
        let mut keys = PlayerKeys {
            game: args.gamekey,
            white: args.whitekey,
            black: args.blackkey,
        };

        let mut bot = args.bot;

        let base = match &args.view_url {
            Some(view) => {
                let mut url = parse_url(view)?;
                for (key, value) in url.query_pairs() {
                    match key.as_ref() {
                        "gamekey" => keys.game = value.into_owned(),
                        "whitekey" => keys.white = value.into_owned(),
                        "blackkey" => keys.black = value.into_owned(),
                        "bot" => bot = value.into_owned(),
                        _ => {}
                    }
                }
                url.set_path("");
                url.set_query(None);
                url.set_fragment(None);
                url
            }
            None => parse_url(&args.server)?,
        };

        if keys.game.is_empty() || !(keys.plays(Piece::White) || keys.plays(Piece::Black)) {
            return Err(ReflectorError::MissingKeys);
        }

        Ok(Self {
            client: Client::new(),
            base,
            bot: parse_url(&bot)?,
            keys,
            poll_interval: args.poll_interval,
            turn_timeout: args.turn_timeout,
            max_turns: args.max_turns,
        })
    }

    pub fn keys(&self) -> &PlayerKeys {
        &self.keys
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn bot(&self) -> &Url {
        &self.bot
    }

    /// Plays until the match server reports a winner or `max_turns` of our
    /// own moves have been relayed.
    pub async fn run(&self) -> Result<Finish, ReflectorError> {
        for _ in 0..self.max_turns {
            let (js, board) = match self.wait_for_turn().await? {
                Turn::Ours { js, board } => (js, board),
                Turn::Over(winner) => {
                    info!("game is over: {winner} won!");
                    return Ok(Finish::GameOver(winner));
                }
            };

            let reply = self.ask_bot(&js, &board).await?;
            info!("forwarding move: {reply}");
            self.submit(reply).await?;
        }

        warn!("stopping after {} turns", self.max_turns);
        Ok(Finish::TurnLimit)
    }

    async fn wait_for_turn(&self) -> Result<Turn, ReflectorError> {
        let turn_start = Instant::now();
        loop {
            let (js, state) = match self.poll().await? {
                Polled::State { js, state } => (js, state),
                Polled::Finished(winner) => return Ok(Turn::Over(winner)),
            };
            if state.winner.is_decided() {
                return Ok(Turn::Over(state.winner));
            }
            if self.keys.plays(state.board.next()) {
                return Ok(Turn::Ours {
                    js,
                    board: state.board,
                });
            }

            if turn_start.elapsed() > self.turn_timeout {
                return Err(ReflectorError::TurnTimeout(self.turn_timeout));
            }
            info!("not our turn yet. Waiting for other player to move.");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Fetches the raw game JSON and its decoded form. A finished game whose
    /// board no longer decodes is reported through its winner alone.
    async fn poll(&self) -> Result<Polled, ReflectorError> {
        let url = self.endpoint("/get", &[]);
        info!("reading game state from {url}");
        let js = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ReflectorError::Http {
                url: url.clone(),
                source,
            })?
            .text()
            .await
            .map_err(|source| ReflectorError::Http { url, source })?;

        match serde_json::from_str::<MatchState>(&js) {
            Ok(state) => Ok(Polled::State { js, state }),
            Err(source) => match serde_json::from_str::<WinnerOnly>(&js) {
                Ok(WinnerOnly { winner }) if winner.is_decided() => Ok(Polled::Finished(winner)),
                _ => Err(ReflectorError::Json { body: js, source }),
            },
        }
    }

    /// Posts the game state to the bot. The bare board also goes into the
    /// `board` query parameter, as the match server itself does.
    async fn ask_bot(&self, js: &str, board: &Board) -> Result<Reply, ReflectorError> {
        info!("asking {} for a move given state: {js}", self.bot);
        let board_js = serde_json::to_string(board).map_err(|source| ReflectorError::Json {
            body: js.to_string(),
            source,
        })?;

        let mut url = self.bot.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "board")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("board", &board_js);

        let resp = self
            .client
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(js.to_string())
            .send()
            .await
            .map_err(|source| ReflectorError::Http {
                url: url.clone(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            warn!("response status from {url} was {status}");
        }
        let text = resp
            .text()
            .await
            .map_err(|source| ReflectorError::Http { url, source })?;

        Ok(text.parse::<Reply>()?)
    }

    async fn submit(&self, reply: Reply) -> Result<(), ReflectorError> {
        let mv = reply.to_string();
        let url = self.endpoint("/move", &[("move", mv.as_str())]);
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ReflectorError::Http {
                url: url.clone(),
                source,
            })?;
        if !resp.status().is_success() {
            warn!("match server answered {} to move {mv}", resp.status());
        }
        Ok(())
    }

    fn endpoint(&self, path: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url.query_pairs_mut()
            .clear()
            .extend_pairs(self.keys.query_pairs())
            .extend_pairs(extra.iter().copied());
        url
    }
}

fn parse_url(text: &str) -> Result<Url, ReflectorError> {
    Url::parse(text).map_err(|source| ReflectorError::Url {
        url: text.to_string(),
        source,
    })
}
