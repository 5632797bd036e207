//! Interactive planning session
//!
//! Readline loop around the conversation machine. All parsing decisions live
//! in the machine; this layer owns the terminal, the slash commands, and the
//! handoff to the generator when the machine asks for a submission.

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::generate::Generator;
use crate::wizard::{SubmitOutcome, Turn, WizardMachine};

/// Interactive wizard session
pub struct WizardSession {
    machine: WizardMachine,
    generator: Generator,
}

impl WizardSession {
    pub fn new(generator: Generator) -> Self {
        Self {
            machine: WizardMachine::new(),
            generator,
        }
    }

    /// Run the conversation loop
    pub async fn run(&mut self, initial_message: Option<String>) -> Result<()> {
        self.print_welcome();

        if let Some(message) = initial_message {
            println!("{} {}", ">".bright_green(), message);
            self.process_message(&message).await;
        }

        let mut rl =
            DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_message(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Feed one message to the machine and act on the result
    async fn process_message(&mut self, input: &str) {
        match self.machine.handle(input) {
            Turn::Reply(text) => {
                println!("{}", text);
            }
            Turn::Submit(request, text) => {
                println!("{}", text);
                let (outcome, _) = self.generator.generate(&request, true).await;
                self.machine.finish(outcome);

                match outcome {
                    SubmitOutcome::Success => {
                        println!();
                        println!(
                            "{}",
                            "Saved. Use /reset to plan another trip, or /quit to leave.".dimmed()
                        );
                    }
                    SubmitOutcome::RetryableFailure => {
                        println!(
                            "{}",
                            "You can try again with \"yes\", or /reset to start over.".dimmed()
                        );
                    }
                    SubmitOutcome::BadCity => {
                        println!("Let's pick a different city. Which one?");
                    }
                    SubmitOutcome::InvalidDays => {
                        println!("Let's fix the trip length. How many days?");
                    }
                }
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "TripPlanner".bright_cyan().bold());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
        println!("{}", WizardMachine::greeting());
    }

    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/reset" | "/r" => {
                self.machine.reset();
                println!("{}", "Starting over.".dimmed());
                println!("{}", WizardMachine::greeting());
                SlashResult::Continue
            }
            "/summary" | "/s" => {
                println!("{}", self.machine.summary());
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Exit the conversation", "/quit".yellow());
        println!("  {:14} Start the conversation over", "/reset".yellow());
        println!("  {:14} Show what has been collected so far", "/summary".yellow());
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
