//! Line-oriented interactive play.

use std::io::{BufRead, Write};

use anyhow::Context;
use chess_core::Square;
use chess_engine::Game;

const HELP: &str = "\
commands:
  <from> <to>   play a move, e.g. `e2 e4`
  moves <sq>    list legal destinations of the piece on <sq>
  moves         list every legal move for the side to move
  undo          take back the last move
  reset         start a new game
  board         print the board
  state         print the game state as JSON
  help          show this text
  quit          leave";

/// Reads commands from `input` until end of input or `quit`, writing all
/// responses to `out`. Returns the game as it stood when the loop ended.
pub fn run<R: BufRead, W: Write>(input: R, mut out: W) -> anyhow::Result<Game> {
    let mut game = Game::new();
    writeln!(out, "{}", game.board())?;
    prompt(&game, &mut out)?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => writeln!(out, "{HELP}")?,
            ["board"] => writeln!(out, "{}", game.board())?,
            ["state"] => writeln!(out, "{}", serde_json::to_string_pretty(&game.state())?)?,
            ["reset"] => {
                game.reset();
                writeln!(out, "{}", game.board())?;
            }
            ["undo"] => {
                if game.undo() {
                    writeln!(out, "{}", game.board())?;
                } else {
                    writeln!(out, "nothing to undo")?;
                }
            }
            ["moves"] => {
                let moves: Vec<String> = game.legal_moves().iter().map(|m| m.to_coordinate()).collect();
                writeln!(out, "{}", moves.join(" "))?;
            }
            ["moves", square] => match square.parse::<Square>() {
                Ok(square) => {
                    let targets: Vec<String> = game
                        .legal_moves_from(square)
                        .iter()
                        .map(|m| m.to().to_string())
                        .collect();
                    writeln!(out, "{}", targets.join(" "))?;
                }
                Err(e) => writeln!(out, "error: {e}")?,
            },
            [from, to] => match game.make_move(from, to) {
                Ok(mv) => {
                    let played = mv.to_string();
                    writeln!(out, "{played}")?;
                    writeln!(out, "{}", game.board())?;
                    if game.is_game_over() {
                        writeln!(out, "game over: {}", game.status())?;
                    }
                }
                Err(e) => writeln!(out, "error: {e}")?,
            },
            _ => writeln!(out, "unknown command, try `help`")?,
        }

        prompt(&game, &mut out)?;
    }

    Ok(game)
}

fn prompt<W: Write>(game: &Game, out: &mut W) -> anyhow::Result<()> {
    let check = if game.is_check() && !game.is_game_over() {
        " (check)"
    } else {
        ""
    };
    write!(out, "{}{}> ", game.current_player(), check)?;
    out.flush()?;
    Ok(())
}
