use mockito::{Matcher, Server};
use reqwest::StatusCode;
use serde_json::json;
use taskpipe::Error;
use taskpipe::centrala::{Submitter, TaskData};
use taskpipe::interpret::CategorizedFiles;

#[test]
fn robot_description_reads_description_field() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/data/key-123/robotid.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"description":"  A tall robot with caterpillar tracks.  "}"#)
        .expect(1)
        .create();

    let data = TaskData::new(server.url(), "key-123");
    let description = data.robot_description().expect("description should load");

    assert_eq!(description, "A tall robot with caterpillar tracks.");
    mock.assert();
}

#[test]
fn robot_description_missing_is_an_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/data/key-123/robotid.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"description":""}"#)
        .create();

    let err = TaskData::new(server.url(), "key-123")
        .robot_description()
        .unwrap_err();
    assert!(matches!(err, Error::MissingField { field: "description" }));
}

#[test]
fn task_data_non_success_is_an_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/data/key-123/robotid.json")
        .with_status(403)
        .with_body("forbidden")
        .create();

    let err = TaskData::new(server.url(), "key-123")
        .fetch_json("robotid.json")
        .unwrap_err();
    assert!(matches!(err, Error::Api { status, .. } if status == StatusCode::FORBIDDEN));
}

#[test]
fn rejected_submission_is_returned_as_is() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/report")
        .match_body(Matcher::Json(json!({
            "task": "robotid",
            "apikey": "key-123",
            "answer": "https://img.example/robot.png"
        })))
        .with_status(400)
        .with_body(r#"{"code":-340,"message":"Wrong answer"}"#)
        .expect(1)
        .create();

    let submitter = Submitter::new(format!("{}/report", server.url()), "key-123");
    let submission = submitter
        .send_answer("robotid", "https://img.example/robot.png")
        .expect("a rejected answer is still a reply");

    assert_eq!(submission.status, StatusCode::BAD_REQUEST);
    assert!(!submission.is_success());
    assert!(submission.body.contains("Wrong answer"));
    mock.assert();
}

#[test]
fn structured_answers_are_posted_as_json() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/report")
        .match_body(Matcher::Json(json!({
            "task": "kategorie",
            "apikey": "key-123",
            "answer": {"people": ["a.txt"], "hardware": ["b.mp3", "c.png"]}
        })))
        .with_status(200)
        .with_body(r#"{"code":0,"message":"OK"}"#)
        .create();

    let answer = CategorizedFiles {
        people: vec!["a.txt".to_string()],
        hardware: vec!["b.mp3".to_string(), "c.png".to_string()],
    };
    let submission = Submitter::new(format!("{}/report", server.url()), "key-123")
        .send_answer("kategorie", &answer)
        .expect("submission should succeed");

    assert!(submission.is_success());
    mock.assert();
}
