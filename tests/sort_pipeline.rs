use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use taskpipe::commands::sort::build_report;
use taskpipe::config::Models;
use taskpipe::openai::OpenAiClient;

fn factory_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("taskpipe-sort-{nanos}"));
    fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    fs::write(dir.join("a.txt"), "Schwytano dwoch ludzi").expect("write");
    fs::write(dir.join("b.png"), b"\x89PNG\r\n\x1a\n").expect("write");
    fs::write(dir.join("c.mp3"), b"ID3-audio").expect("write");
    fs::write(dir.join("d.txt"), "Aktualizacja oprogramowania").expect("write");
    dir
}

fn reply_to_user(server: &mut ServerGuard, user: &str, reply: &str) -> mockito::Mock {
    server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "max_tokens": 20,
            "messages": [{"role": "system"}, {"role": "user", "content": user}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": [{"message": {"content": reply}}]}).to_string())
        .expect(1)
        .create()
}

#[test]
fn report_merges_all_three_modalities() {
    let dir = factory_dir();
    let mut server = Server::new();

    let ocr = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Extract text from images".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"choices": [{"message": {"content": "Naprawiono przekaznik"}}]}).to_string(),
        )
        .expect(1)
        .create();
    let transcription = server
        .mock("POST", "/audio/transcriptions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"text":"Ludzie przy czujniku"}"#)
        .expect(1)
        .create();
    let text_people = reply_to_user(&mut server, "Schwytano dwoch ludzi", "people");
    let text_software = reply_to_user(&mut server, "Aktualizacja oprogramowania", "software");
    let image_hardware = reply_to_user(&mut server, "Naprawiono przekaznik", "Hardware");
    let audio_both = reply_to_user(&mut server, "Ludzie przy czujniku", "People, hardware");

    let client = OpenAiClient::new("sk-test", server.url());
    let report = build_report(&client, &Models::default(), &dir).expect("report should build");

    assert_eq!(report.text.people, vec!["a.txt"]);
    assert!(report.text.hardware.is_empty());
    assert_eq!(report.images.hardware, vec!["b.png"]);
    assert_eq!(report.audio.people, vec!["c.mp3"]);
    assert_eq!(report.audio.hardware, vec!["c.mp3"]);
    assert_eq!(report.merged.people, vec!["a.txt", "c.mp3"]);
    assert_eq!(report.merged.hardware, vec!["b.png", "c.mp3"]);

    for mock in [ocr, transcription, text_people, text_software, image_hardware, audio_both] {
        mock.assert();
    }
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn failing_file_aborts_the_batch() {
    let dir = factory_dir();
    let mut server = Server::new();
    server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream down")
        .create();
    let transcription = server
        .mock("POST", "/audio/transcriptions")
        .expect(0)
        .create();

    let client = OpenAiClient::new("sk-test", server.url());
    let err = build_report(&client, &Models::default(), &dir).unwrap_err();

    assert!(err.to_string().contains("upstream down"));
    transcription.assert();
    let _ = fs::remove_dir_all(dir);
}
