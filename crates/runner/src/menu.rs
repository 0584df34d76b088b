use std::fmt;
use std::io::{self, BufRead, Write};

use log::{debug, error};
use rex_core::{OrderSide, Price};
use rex_exchange::{Admission, Exchange, SideStats};
use rex_ledger::Wallet;
use thiserror::Error;

const RULE: &str = "=================================";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MenuError {
    #[error("Invalid input type: '{0}'")]
    NotANumber(String),
    #[error("Input out of range: {0}. Make another selection.")]
    OutOfRange(i64),
}

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Help,
    Stats,
    Ask,
    Bid,
    Wallet,
    Next,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 7] = [
        MenuOption::Help,
        MenuOption::Stats,
        MenuOption::Ask,
        MenuOption::Bid,
        MenuOption::Wallet,
        MenuOption::Next,
        MenuOption::Exit,
    ];

    /// Parse a selection; only the integers 1-7 are valid
    pub fn parse(input: &str) -> Result<Self, MenuError> {
        let input = input.trim();
        let number: i64 = input
            .parse()
            .map_err(|_| MenuError::NotANumber(input.to_string()))?;

        match number {
            1..=7 => Ok(Self::ALL[(number - 1) as usize]),
            _ => Err(MenuError::OutOfRange(number)),
        }
    }

    pub fn number(self) -> usize {
        Self::ALL.iter().position(|o| *o == self).unwrap_or(0) + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Help => "Print help",
            MenuOption::Stats => "Print exchange stats",
            MenuOption::Ask => "Make an ask",
            MenuOption::Bid => "Make a bid",
            MenuOption::Wallet => "Print wallet",
            MenuOption::Next => "Go to next timeframe",
            MenuOption::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.number(), self.label())
    }
}

/// Interactive menu loop over an exchange
pub struct Session<R, W> {
    exchange: Exchange<Wallet>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(exchange: Exchange<Wallet>, input: R, output: W) -> Self {
        Self {
            exchange,
            input,
            output,
        }
    }

    pub fn exchange(&self) -> &Exchange<Wallet> {
        &self.exchange
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or the input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.read_line()? else {
                debug!("Input closed, leaving menu");
                break;
            };

            match MenuOption::parse(&line) {
                Ok(MenuOption::Exit) => break,
                Ok(option) => {
                    writeln!(self.output, "   You chose: {}", option.number())?;
                    self.process(option)?;
                    writeln!(self.output)?;
                }
                Err(err) => writeln!(self.output, "   ERROR: {}", err)?,
            }
        }
        Ok(())
    }

    /// Carry out one menu action
    pub fn process(&mut self, option: MenuOption) -> io::Result<()> {
        match option {
            MenuOption::Help => self.print_help(),
            MenuOption::Stats => self.print_stats(),
            MenuOption::Ask => self.enter_order(OrderSide::Ask),
            MenuOption::Bid => self.enter_order(OrderSide::Bid),
            MenuOption::Wallet => self.print_wallet(),
            MenuOption::Next => self.next_step(),
            MenuOption::Exit => Ok(()),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "The current time is: {}",
            self.exchange.current_time()
        )?;
        for option in MenuOption::ALL {
            writeln!(self.output, "{}", option)?;
        }
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "Type in 1-7")
    }

    fn print_help(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Help - your aim is to make money. Analyse the market and make bids and asks."
        )?;
        writeln!(
            self.output,
            "Orders are entered as product,price,amount (e.g. ETH/BTC,0.02,0.5) and \
             are matched when you move to the next timeframe."
        )
    }

    fn print_stats(&mut self) -> io::Result<()> {
        writeln!(self.output, "Market Information:")?;
        for stats in self.exchange.market_stats() {
            writeln!(self.output, "Product: {}", stats.product)?;
            write_side(&mut self.output, "ask", &stats.asks)?;
            write_side(&mut self.output, "bid", &stats.bids)?;
        }
        Ok(())
    }

    fn enter_order(&mut self, side: OrderSide) -> io::Result<()> {
        writeln!(
            self.output,
            "Make {} {} - enter: product,price,amount. E.g: ETH/BTC,0.02,0.5",
            if side == OrderSide::Ask { "an" } else { "a" },
            side
        )?;

        let Some(line) = self.read_line()? else {
            return Ok(());
        };
        let line = line.trim();
        writeln!(self.output, "   You entered: {}", line)?;

        match self.exchange.submit(side, line) {
            Ok(Admission::Accepted(_)) => {
                writeln!(self.output, "   Wallet looks good. Order placed.")
            }
            Ok(Admission::InsufficientFunds(_)) => {
                writeln!(self.output, "   Insufficient funds to process order.")
            }
            Err(err) => writeln!(self.output, "   ERROR: {}", err),
        }
    }

    fn print_wallet(&mut self) -> io::Result<()> {
        let wallet = self.exchange.wallet();
        writeln!(
            self.output,
            "Your wallet has {} currencies",
            wallet.len()
        )?;
        write!(self.output, "{}", wallet)
    }

    fn next_step(&mut self) -> io::Result<()> {
        writeln!(self.output, "Going to next time step.")?;

        let report = match self.exchange.advance() {
            Ok(report) => report,
            Err(err) => {
                error!("Time step failed: {}", err);
                return writeln!(self.output, "   ERROR: {}", err);
            }
        };

        for (product, trades) in &report.trades {
            writeln!(self.output, "Matching bids/asks for : {}", product)?;
            writeln!(self.output, "Sales: {}", trades.len())?;
            for trade in trades {
                writeln!(
                    self.output,
                    "   Sale price: {} amount {}",
                    trade.price, trade.amount
                )?;
            }
        }
        if report.wrapped() {
            writeln!(self.output, "End of data reached, starting over.")?;
        }
        Ok(())
    }
}

fn write_side(output: &mut impl Write, side: &str, stats: &SideStats) -> io::Result<()> {
    writeln!(output, "   {}s seen: {}", side, stats.count)?;
    writeln!(output, "   Max {}  : {}", side, price_or_dash(stats.high))?;
    writeln!(output, "   Min {}  : {}", side, price_or_dash(stats.low))?;
    writeln!(output, "   Spread   : {}", price_or_dash(stats.spread))?;
    writeln!(output)
}

fn price_or_dash(price: Option<Price>) -> String {
    price.map_or_else(|| "-".to_string(), |p| p.to_string())
}
