use clap::Args;
use serde_json::Value;

use crate::centrala::Submitter;
use crate::config::Settings;
use crate::error::Result;

#[derive(Debug, Args, Clone)]
pub struct SubmitArgs {
    /// Task identifier
    pub task: String,
    /// Answer to send
    pub answer: String,
    /// Parse the answer as JSON instead of sending it as a string
    #[arg(long)]
    pub json: bool,
}

/// Posts an answer and prints whatever came back, success or not.
pub fn run(args: SubmitArgs) -> Result<()> {
    let settings = Settings::load()?;
    let submitter = Submitter::from_settings(&settings)?;

    let answer = if args.json {
        serde_json::from_str::<Value>(&args.answer)?
    } else {
        Value::String(args.answer)
    };
    let submission = submitter.send_answer(&args.task, &answer)?;
    println!("{}", submission.status);
    println!("{}", submission.body);
    Ok(())
}
