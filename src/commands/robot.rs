use clap::Args;

use crate::centrala::{Submitter, TaskData};
use crate::commands::label;
use crate::config::Settings;
use crate::error::Result;
use crate::openai::{ImageRequest, OpenAiClient};

pub const ROBOT_TASK: &str = "robotid";

#[derive(Debug, Args, Clone, Default)]
pub struct RobotArgs {
    /// Submit the generated image URL as the task answer
    #[arg(long)]
    pub submit: bool,
}

pub fn run(args: RobotArgs) -> Result<()> {
    let settings = Settings::load()?;
    let task_data = TaskData::from_settings(&settings)?;
    let client = OpenAiClient::from_settings(&settings)?;
    let submitter = if args.submit {
        Some(Submitter::from_settings(&settings)?)
    } else {
        None
    };

    let description = task_data.robot_description()?;
    println!("{description}");

    let request = ImageRequest::new(settings.models.image.as_str(), description);
    let url = client.generate_image(&request)?;
    println!("{url}");

    if let Some(submitter) = submitter {
        let submission = submitter.send_answer(ROBOT_TASK, &url)?;
        println!("{} {} {}", label("Submission:"), submission.status, submission.body);
    }
    Ok(())
}
