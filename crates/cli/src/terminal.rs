// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::{Result, bail};
use crossterm::{
    queue,
    style::{self, Stylize},
};
use log::error;
use std::{
    io::{self, BufRead, Write},
    thread,
    time::Duration,
};

use shortstack_core::{
    AppliedAction, Chips, GameEnd, GameOver, GameState, Observer, Outcome, PlayerAction,
    PlayerCards, PlayerView, Strategy,
};

/// Prints the game to the terminal.
pub struct TerminalObserver<W> {
    out: W,
    delay: Duration,
}

impl TerminalObserver<io::Stdout> {
    /// Creates an observer that prints to stdout, waiting `delay` after each
    /// computer player action.
    pub fn stdout(delay: Duration) -> Self {
        Self::new(io::stdout(), delay)
    }
}

impl<W: Write> TerminalObserver<W> {
    /// Creates an observer that prints to `out`.
    pub fn new(out: W, delay: Duration) -> Self {
        Self { out, delay }
    }

    fn print_action(&mut self, state: &GameState, action: &AppliedAction) -> Result<()> {
        let name = &state.players()[action.seat].name;
        let text = match action.action {
            PlayerAction::CheckOrCall if action.chips == Chips::ZERO => format!("{name} checks"),
            PlayerAction::CheckOrCall => format!("{name} calls {}", action.chips),
            PlayerAction::Bet => format!("{name} bets {}", action.chips),
            PlayerAction::Fold => format!("{name} folds"),
            PlayerAction::Quit => format!("{name} quits"),
        };

        let text = if action.all_in {
            format!("{text} and is all in")
        } else {
            text
        };

        queue!(
            self.out,
            style::PrintStyledContent(text.as_str().dark_yellow()),
            style::Print("\n")
        )?;
        self.out.flush()?;

        Ok(())
    }

    fn print_table(&mut self, state: &GameState) -> Result<()> {
        let board = state
            .board()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let header = format!(
            "--- {} --- pot {} board [{board}]",
            state.street(),
            state.pot()
        );

        queue!(
            self.out,
            style::Print("\n"),
            style::PrintStyledContent(header.as_str().bold()),
            style::Print("\n")
        )?;

        for player in state.players() {
            let text = player_line(player);
            if Some(player.seat) == state.viewer() {
                queue!(self.out, style::PrintStyledContent(text.as_str().green()))?;
            } else {
                queue!(self.out, style::PrintStyledContent(text.as_str().dark_green()))?;
            }
            queue!(self.out, style::Print("\n"))?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn print_outcome(&mut self, state: &GameState, outcome: &Outcome) -> Result<()> {
        self.print_table(state)?;

        let hand = outcome
            .winning_hand
            .as_ref()
            .map(|h| format!(" with {}", h.description()))
            .unwrap_or_default();

        let text = if outcome.draw {
            format!("Pot of {} split{hand}", outcome.pot)
        } else {
            format!("{} wins {}{hand}", outcome.winner, outcome.pot)
        };

        queue!(
            self.out,
            style::PrintStyledContent(text.as_str().cyan().bold()),
            style::Print("\n")
        )?;

        for payoff in &outcome.payoffs {
            let name = &state.players()[payoff.seat].name;
            queue!(self.out, style::Print(format!("  {name} +{}\n", payoff.chips)))?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn print_game_over(&mut self, over: &GameOver) -> Result<()> {
        let text = match over.end {
            GameEnd::LastPlayerStanding => {
                format!("{} wins the game after {} hands", over.winner_name, over.hands)
            }
            GameEnd::Quit(_) | GameEnd::Stopped => {
                format!("Game over after {} hands, {} leads", over.hands, over.winner_name)
            }
        };

        queue!(
            self.out,
            style::Print("\n"),
            style::PrintStyledContent(text.as_str().magenta().bold()),
            style::Print("\n")
        )?;
        self.out.flush()?;

        Ok(())
    }
}

impl<W: Write> Observer for TerminalObserver<W> {
    fn player_action(&mut self, state: &GameState, action: &AppliedAction) {
        if let Err(err) = self.print_action(state, action) {
            error!("Terminal error {err}");
        }

        if Some(action.seat) != state.viewer() && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    fn street_change(&mut self, state: &GameState) {
        if let Err(err) = self.print_table(state) {
            error!("Terminal error {err}");
        }
    }

    fn round_end(&mut self, state: &GameState, outcome: &Outcome) -> bool {
        if let Err(err) = self.print_outcome(state, outcome) {
            error!("Terminal error {err}");
        }

        true
    }

    fn game_end(&mut self, _state: &GameState, over: &GameOver) {
        if let Err(err) = self.print_game_over(over) {
            error!("Terminal error {err}");
        }
    }
}

/// Formats a player row.
fn player_line(p: &PlayerView) -> String {
    let cards = match p.cards {
        PlayerCards::None => String::new(),
        PlayerCards::Covered => "▒▒ ▒▒".to_string(),
        PlayerCards::Cards(c1, c2) => format!("{c1} {c2}"),
    };

    let button = if p.has_button { "D" } else { "" };
    let action = p.action.map(|a| a.label()).unwrap_or_default();
    let bet = if p.bet > Chips::ZERO {
        p.bet.to_string()
    } else {
        String::new()
    };

    format!(
        "{button:^3}|{:<10.10}|{:>10.10}|{:<6}|{:>8.8}|{cards:<6}",
        p.name,
        p.chips.to_string(),
        action,
        bet
    )
}

/// A command typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Check or call.
    Call,
    /// Bet the given chips over the current bet.
    Bet(Chips),
    /// Fold the hand.
    Fold,
    /// Quit the game.
    Quit,
}

impl Command {
    /// Parses a command line, one of `c`, `b <amount>`, `f` or `q`.
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            bail!("empty command");
        };

        let command = match cmd.to_ascii_lowercase().as_str() {
            "c" | "call" | "check" => Command::Call,
            "f" | "fold" => Command::Fold,
            "q" | "quit" => Command::Quit,
            "b" | "bet" | "r" | "raise" => {
                let Some(amount) = parts.next() else {
                    bail!("missing bet amount");
                };

                let amount = amount
                    .parse::<u32>()
                    .map_err(|_| anyhow::anyhow!("invalid bet amount {amount}"))?;
                if amount == 0 {
                    bail!("bet amount must be positive");
                }

                Command::Bet(Chips::new(amount))
            }
            _ => bail!("unknown command {cmd}"),
        };

        if parts.next().is_some() {
            bail!("unexpected arguments after {cmd}");
        }

        Ok(command)
    }
}

/// Reads the player decisions from a terminal.
pub struct TerminalInput<R, W> {
    input: R,
    out: W,
}

impl TerminalInput<io::StdinLock<'static>, io::Stdout> {
    /// Creates an input that reads from stdin.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalInput<R, W> {
    /// Creates an input that reads commands from `input` and prompts on `out`.
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn prompt(&mut self, state: &GameState) -> Result<()> {
        let to_call = state
            .viewer()
            .map(|seat| state.to_call(seat))
            .unwrap_or_default();

        let call = if to_call > Chips::ZERO {
            format!("[c]all {to_call}")
        } else {
            "[c]heck".to_string()
        };

        write!(self.out, "{call}, [b]et <chips>, [f]old, [q]uit > ")?;
        self.out.flush()?;
        Ok(())
    }

    fn read_command(&mut self, state: &GameState) -> Result<Command> {
        loop {
            self.prompt(state)?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // End of input.
                return Ok(Command::Quit);
            }

            match Command::parse(&line) {
                Ok(cmd) => return Ok(cmd),
                Err(err) => writeln!(self.out, "{err}, try again")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Strategy for TerminalInput<R, W> {
    fn decide(&mut self, state: &GameState) -> (PlayerAction, Chips) {
        match self.read_command(state) {
            Ok(Command::Call) => (PlayerAction::CheckOrCall, Chips::ZERO),
            Ok(Command::Bet(chips)) => (PlayerAction::Bet, chips),
            Ok(Command::Fold) => (PlayerAction::Fold, Chips::ZERO),
            Ok(Command::Quit) => (PlayerAction::Quit, Chips::ZERO),
            Err(err) => {
                error!("Input error {err}");
                (PlayerAction::Quit, Chips::ZERO)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use shortstack_bot::CallingStation;
    use shortstack_core::{Config, Game, Seat};
    use std::io::Cursor;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("c").unwrap(), Command::Call);
        assert_eq!(Command::parse("  C \n").unwrap(), Command::Call);
        assert_eq!(Command::parse("check").unwrap(), Command::Call);
        assert_eq!(Command::parse("f").unwrap(), Command::Fold);
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
        assert_eq!(
            Command::parse("b 120").unwrap(),
            Command::Bet(Chips::new(120))
        );
        assert_eq!(
            Command::parse("raise 40").unwrap(),
            Command::Bet(Chips::new(40))
        );
    }

    #[test]
    fn reject_bad_commands() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("x").is_err());
        assert!(Command::parse("b").is_err());
        assert!(Command::parse("b ten").is_err());
        assert!(Command::parse("b 0").is_err());
        assert!(Command::parse("b -5").is_err());
        assert!(Command::parse("c 10").is_err());
    }

    #[test]
    fn player_row() {
        let view = PlayerView {
            seat: 0,
            name: "Alice".to_string(),
            chips: Chips::new(1_500),
            bet: Chips::new(20),
            action: Some(PlayerAction::Bet),
            cards: PlayerCards::Covered,
            folded: false,
            has_button: true,
        };

        let line = player_line(&view);
        assert!(line.contains("Alice"));
        assert!(line.contains("1,500"));
        assert!(line.contains("BET"));
        assert!(line.contains("▒▒ ▒▒"));
        assert!(line.starts_with(" D "));
    }

    #[test]
    fn input_reprompts_until_quit() {
        let input = Cursor::new(b"bet\nxyz\nq\n".to_vec());
        let config = Config {
            players: 2,
            ..Config::default()
        };
        let seats = vec![
            Seat::human("You", TerminalInput::new(input, io::sink())),
            Seat::bot("Alice", CallingStation),
        ];
        let observer = TerminalObserver::new(io::sink(), Duration::ZERO);

        let mut game = Game::with_rng(&config, seats, observer, StdRng::seed_from_u64(4)).unwrap();
        let over = game.run().unwrap();
        assert_eq!(over.end, GameEnd::Quit(0));
        assert_eq!(over.hands, 1);
        assert_eq!(over.winner, Some(1));
    }

    #[test]
    fn end_of_input_quits() {
        let config = Config {
            players: 2,
            ..Config::default()
        };
        let seats = vec![
            Seat::human("You", TerminalInput::new(Cursor::new(Vec::new()), io::sink())),
            Seat::bot("Alice", CallingStation),
        ];
        let observer = TerminalObserver::new(io::sink(), Duration::ZERO);

        let mut game = Game::with_rng(&config, seats, observer, StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(game.run().unwrap().end, GameEnd::Quit(0));
    }
}
