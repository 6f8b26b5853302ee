use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use othello::config::ReflectorArgs;
use othello::reflector::{Finish, Reflector, ReflectorError};
use othello::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    telemetry::init();

    let reflector = match Reflector::from_args(ReflectorArgs::parse()) {
        Ok(reflector) => reflector,
        Err(err @ ReflectorError::MissingKeys) => {
            eprintln!("{err}\n");
            ReflectorArgs::command().print_help()?;
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err.into()),
    };

    match reflector.run().await? {
        Finish::GameOver(winner) => println!("game is over: {winner} won!"),
        Finish::TurnLimit => println!("turn limit reached, leaving the game"),
    }
    Ok(ExitCode::SUCCESS)
}
