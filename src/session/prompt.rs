//! Console prompts with validation
//!
//! Every prompt re-asks until it gets a usable answer. Only the end of the
//! input stream or an I/O failure is reported as an error.

use std::io::{BufRead, Write};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Money, MoneyParseError};

/// Reads answers from `input` and writes prompts and feedback to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line of feedback
    pub fn say(&mut self, line: &str) -> TrackerResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Print a block of text as-is
    pub fn write_block(&mut self, text: &str) -> TrackerResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> TrackerResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            // Keep the transcript readable when stdin is a pipe
            writeln!(self.output)?;
            return Err(TrackerError::Input(format!(
                "input ended while waiting for an answer to {:?}",
                prompt.trim()
            )));
        }

        Ok(line.trim().to_string())
    }

    /// Ask for a non-empty expense name
    pub fn expense_name(&mut self) -> TrackerResult<String> {
        loop {
            let name = self.ask("Enter expense name: ")?;
            if !name.is_empty() {
                return Ok(name);
            }
            self.say("Expense name cannot be empty. Please try again.")?;
        }
    }

    /// Ask for a strictly positive amount
    pub fn expense_amount(&mut self) -> TrackerResult<Money> {
        loop {
            let answer = self.ask("Enter expense amount: ")?;
            match Money::parse(&answer) {
                Ok(amount) if amount.is_positive() => return Ok(amount),
                Ok(_) => self.say("Amount must be greater than zero.")?,
                Err(err @ MoneyParseError::OutOfRange) => self.say(&err.to_string())?,
                Err(_) => self.say("Invalid amount. Please enter a numeric value.")?,
            }
        }
    }

    /// Show the numbered category menu and ask for a choice
    pub fn category(&mut self) -> TrackerResult<Category> {
        let prompt = format!("Enter the number of the category [1 - {}]: ", Category::COUNT);

        loop {
            self.say("Select a category for your expense:")?;
            for (i, category) in Category::all().iter().enumerate() {
                self.say(&format!("  {}. {}", i + 1, category))?;
            }

            let answer = self.ask(&prompt)?;
            match answer.parse::<usize>() {
                Ok(number) => match Category::from_menu_number(number) {
                    Some(category) => return Ok(category),
                    None => {
                        self.say("Invalid selection. Please enter a number in the given range.")?
                    }
                },
                Err(_) => self.say("Invalid input. Please enter a number.")?,
            }
        }
    }

    /// Ask a yes/no question; accepts yes, no, y, n in any case
    pub fn confirm(&mut self, question: &str) -> TrackerResult<bool> {
        loop {
            let answer = self.ask(question)?.to_lowercase();
            match answer.as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => self.say("Invalid input. Please enter 'yes' or 'no'.")?,
            }
        }
    }

    /// Ask for the monthly budget; zero is allowed, negatives are not
    pub fn budget(&mut self) -> TrackerResult<Money> {
        loop {
            let answer = self.ask("Enter your budget for the month: ")?;
            match Money::parse(&answer) {
                Ok(budget) if budget.is_negative() => self.say("Budget cannot be negative.")?,
                Ok(budget) => return Ok(budget),
                Err(err @ MoneyParseError::OutOfRange) => self.say(&err.to_string())?,
                Err(_) => self.say("Invalid input. Please enter a numeric value.")?,
            }
        }
    }
}
