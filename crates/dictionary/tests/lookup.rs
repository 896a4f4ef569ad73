use std::time::Duration;

use dictionary::{Dictionary, DictionaryConfig, DictionaryError, Lookup, LookupStatus};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const FOUND_BODY: &str = r#"[
    {
        "word": "the",
        "phonetics": [{"text": "/ðə/"}, {"text": "/ðiː/", "audio": "https://example.org/the-us.mp3"}],
        "meanings": [
            {
                "partOfSpeech": "article",
                "definitions": [{"definition": "Definite grammatical article.", "synonyms": [], "antonyms": []}],
                "synonyms": [],
                "antonyms": ["a"]
            }
        ]
    },
    {
        "word": "the",
        "phonetics": [],
        "meanings": [{"partOfSpeech": "adverb", "definitions": [{"definition": "Ignored."}]}]
    }
]"#;

/// Answers exactly one request with the given status line and body, then yields the request line.
async fn respond_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).into_owned();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request.lines().next().unwrap_or_default().to_owned()
    });
    (format!("http://{addr}/api/v2/entries/en/"), handle)
}

fn dictionary(base_url: String) -> Dictionary {
    Dictionary::new(DictionaryConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_found_word_uses_first_entry() {
    let (url, server) = respond_once("200 OK", FOUND_BODY).await;
    let lookup = dictionary(url).lookup("The").await;
    assert_eq!(lookup.status(), LookupStatus::Ok);

    let Lookup::Found(word) = lookup else {
        panic!("expected a found word");
    };
    assert_eq!(word.text, "the");
    assert_eq!(word.phonetic_text.as_deref(), Some("/ðiː/"));
    assert_eq!(word.phonetic_audio.as_deref(), Some("https://example.org/the-us.mp3"));
    assert_eq!(word.meanings.len(), 1);
    assert_eq!(word.meanings[0].part_of_speech, "article");
    assert_eq!(word.meanings[0].antonyms, Some(vec!["a".to_owned()]));

    assert_eq!(server.await.unwrap(), "GET /api/v2/entries/en/the HTTP/1.1");
}

#[tokio::test]
async fn test_not_found() {
    let (url, server) = respond_once(
        "404 Not Found",
        r#"{"title": "No Definitions Found", "message": "Sorry pal, we couldn't find definitions for the word you were looking for.", "resolution": "You can try the search again at later time or head to the web instead."}"#,
    )
    .await;
    let dictionary = dictionary(url);
    match dictionary.get_definition("xyzzyqq").await {
        Err(DictionaryError::NotFound(reason)) => assert!(reason.message().starts_with("Sorry pal")),
        other => panic!("expected not found, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_not_found_without_body() {
    let (url, server) = respond_once("404 Not Found", "").await;
    let lookup = dictionary(url).lookup("Xyzzyqq").await;
    assert_eq!(lookup.status(), LookupStatus::NotFound);
    assert_eq!(lookup.word(), "xyzzyqq");
    server.await.unwrap();
}

#[tokio::test]
async fn test_server_error_is_errored() {
    let (url, server) = respond_once("500 Internal Server Error", "oops").await;
    match dictionary(url).lookup("word").await {
        Lookup::Errored { word, error } => {
            assert_eq!(word, "word");
            assert!(matches!(error, DictionaryError::Status(status) if status.as_u16() == 500));
        }
        other => panic!("expected errored, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_is_errored() {
    let (url, server) = respond_once("200 OK", r#"[{"word": "word"}]"#).await;
    match dictionary(url).lookup("word").await {
        Lookup::Errored { error, .. } => assert!(matches!(error, DictionaryError::Deserialize(_))),
        other => panic!("expected errored, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_empty_array_is_errored() {
    let (url, server) = respond_once("200 OK", "[]").await;
    match dictionary(url).lookup("word").await {
        Lookup::Errored { error, .. } => assert!(matches!(error, DictionaryError::Empty)),
        other => panic!("expected errored, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_timeout_is_errored() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        drop(socket);
    });
    let dictionary = Dictionary::new(DictionaryConfig {
        base_url: format!("http://{addr}/"),
        timeout: Duration::from_millis(200),
    })
    .unwrap();
    match dictionary.lookup("slow").await {
        Lookup::Errored { error: DictionaryError::Fetch(error), .. } => assert!(error.is_timeout()),
        other => panic!("expected a timeout, got {other:?}"),
    }
    server.abort();
}

#[tokio::test]
async fn test_connection_refused_is_errored() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let lookup = dictionary(format!("http://{addr}/")).lookup("word").await;
    assert_eq!(lookup.status(), LookupStatus::Errored);
}

#[test]
fn test_invalid_base_url() {
    let result = Dictionary::new(DictionaryConfig {
        base_url: "not a url".to_owned(),
        ..Default::default()
    });
    assert!(matches!(result, Err(DictionaryError::InvalidUrl { .. })));

    let result = Dictionary::new(DictionaryConfig {
        base_url: "mailto:someone@example.org".to_owned(),
        ..Default::default()
    });
    assert!(matches!(result, Err(DictionaryError::InvalidUrl { .. })));
}
