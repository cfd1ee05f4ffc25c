//! The move-input loop: reads column numbers, feeds them to a
//! [`GameSession`] and writes the final report.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::DriverError;
use crate::game::{GameSession, GameStatus, Player};
use crate::render::{render_board, render_full_board};

/// Loop behaviour, usually taken from [`AppConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayOptions {
    pub render: bool,
    pub show_padding: bool,
    pub retry_on_input_error: bool,
}

impl From<&AppConfig> for PlayOptions {
    fn from(config: &AppConfig) -> Self {
        PlayOptions {
            render: config.render.enabled,
            show_padding: config.render.show_padding,
            retry_on_input_error: config.play.retry_on_input_error,
        }
    }
}

/// Outcome of a finished loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    pub status: GameStatus,
    pub winner: Option<Player>,
    pub steps: usize,
}

/// Whitespace-separated tokens pulled from a reader one line at a time.
///
/// Tokens stay raw bytes; input that is not UTF-8 is a bad token, not an
/// I/O failure.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<Vec<u8>>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Tokens {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        while self.pending.is_empty() {
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                line.split(|b| b.is_ascii_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(<[u8]>::to_vec),
            );
        }
        Ok(self.pending.pop_front())
    }
}

fn parse_column(token: &[u8]) -> Option<i64> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

/// Play one game from `reader`, writing board snapshots and the result to
/// `writer`.
///
/// The loop runs while the game is continuing. A token that is not an
/// integer, or running out of input, ends the game with `InputError`.
pub fn run_game<R, W>(
    reader: R,
    writer: &mut W,
    options: PlayOptions,
) -> Result<GameReport, DriverError>
where
    R: BufRead,
    W: Write,
{
    let mut session = GameSession::new();
    let mut tokens = Tokens::new(reader);
    let mut input_failed = false;

    while session.status() == GameStatus::Continuing {
        let Some(token) = tokens.next_token()? else {
            warn!(step = session.step(), "input ended before the game finished");
            input_failed = true;
            break;
        };
        let column = match parse_column(&token) {
            Some(column) => column,
            None => {
                let token = String::from_utf8_lossy(&token);
                warn!(step = session.step(), token = %token, "input is not a column number");
                input_failed = true;
                break;
            }
        };
        debug!(step = session.step(), column, "gameloop input");

        let step_before = session.step();
        let status = session.apply_move(column);

        if status == GameStatus::InputError && options.retry_on_input_error {
            writeln!(writer, "INVALID MOVE: {column}")?;
            session.clear_input_error();
            continue;
        }

        if options.render && session.step() > step_before {
            let board = if options.show_padding {
                render_full_board(session.board())
            } else {
                render_board(session.board())
            };
            writeln!(writer, "{board}")?;
        }
    }

    let status = if input_failed {
        GameStatus::InputError
    } else {
        session.status()
    };
    debug!(steps = session.step(), state = status.code(), "game ends");

    match (status, session.winner()) {
        (GameStatus::Draw, _) => writeln!(writer, "DRAW")?,
        (GameStatus::Won, Some(player)) => writeln!(writer, "WINNER: {player}")?,
        (GameStatus::InputError, _) => warn!("game ended on input error"),
        _ => warn!(state = status.code(), "game ended in an unexpected state"),
    }
    writer.flush()?;

    Ok(GameReport {
        status,
        winner: session.winner(),
        steps: session.step(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, options: PlayOptions) -> (GameReport, String) {
        let mut out = Vec::new();
        let report = run_game(input.as_bytes(), &mut out, options).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_vertical_win_report() {
        let (report, out) = run("0\n1\n0\n1\n0\n1\n0\n", PlayOptions::default());
        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(report.winner, Some(Player::One));
        assert_eq!(report.steps, 7);
        assert_eq!(out, "WINNER: Player 1\n");
    }

    #[test]
    fn test_tokens_span_lines_and_spaces() {
        let (report, out) = run("0 0 1\n1 2\n\n  2 3", PlayOptions::default());
        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(out, "WINNER: Player 1\n");
    }

    #[test]
    fn test_trailing_input_is_ignored_after_win() {
        let (report, _) = run("0 1 0 1 0 1 0 5 5 5", PlayOptions::default());
        assert_eq!(report.steps, 7);
    }

    #[test]
    fn test_out_of_range_ends_game() {
        let (report, out) = run("0 1 3 9 4", PlayOptions::default());
        assert_eq!(report.status, GameStatus::InputError);
        assert_eq!(report.steps, 3);
        assert_eq!(report.winner, None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_numeric_token_ends_game() {
        let (report, out) = run("0 1 x 2", PlayOptions::default());
        assert_eq!(report.status, GameStatus::InputError);
        assert_eq!(report.steps, 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_utf8_token_ends_game() {
        let mut out = Vec::new();
        let report = run_game(&b"0 1 \xff\xfe 2\n"[..], &mut out, PlayOptions::default()).unwrap();
        assert_eq!(report.status, GameStatus::InputError);
        assert_eq!(report.steps, 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_utf8_after_win_is_never_read() {
        let mut out = Vec::new();
        let report =
            run_game(&b"0 1 0 1 0 1 0\n\xff\n"[..], &mut out, PlayOptions::default()).unwrap();
        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(out, b"WINNER: Player 1\n");
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column(b"6"), Some(6));
        assert_eq!(parse_column(b"-3"), Some(-3));
        assert_eq!(parse_column(b"x"), None);
        assert_eq!(parse_column(b"\xff"), None);
    }

    #[test]
    fn test_end_of_input_is_input_error() {
        let (report, _) = run("0 1", PlayOptions::default());
        assert_eq!(report.status, GameStatus::InputError);
        assert_eq!(report.steps, 2);
    }

    #[test]
    fn test_retry_keeps_reading() {
        let options = PlayOptions {
            retry_on_input_error: true,
            ..PlayOptions::default()
        };
        let (report, out) = run("0 1 0 9 1 0 1 0", options);
        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(report.winner, Some(Player::One));
        assert_eq!(out, "INVALID MOVE: 9\nWINNER: Player 1\n");
    }

    #[test]
    fn test_render_after_each_successful_move() {
        let options = PlayOptions {
            render: true,
            retry_on_input_error: true,
            ..PlayOptions::default()
        };
        let (_, out) = run("3 -1", options);
        let boards = out.matches("0 1 2 3 4 5 6").count();
        assert_eq!(boards, 1);
        assert!(out.contains(". . . X . . ."));
        assert!(out.contains("INVALID MOVE: -1"));
    }

    #[test]
    fn test_render_padded_board() {
        let options = PlayOptions {
            render: true,
            show_padding: true,
            ..PlayOptions::default()
        };
        let (_, out) = run("0", options);
        assert!(out.contains("9 9 9 0 9 9 9 9 9 9 9 9 9"));
    }

    #[test]
    fn test_options_from_config() {
        let mut config = AppConfig::default();
        config.render.enabled = true;
        config.play.retry_on_input_error = true;
        let options = PlayOptions::from(&config);
        assert!(options.render);
        assert!(!options.show_padding);
        assert!(options.retry_on_input_error);
    }
}
