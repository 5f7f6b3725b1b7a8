use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use euro24_terminal::http_client::fetch_text;
use euro24_terminal::statsbomb::{EventSource, OpenData};

// Serves one canned response per accepted connection, then stops.
fn serve(responses: Vec<(&'static str, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
            let mut line = String::new();
            while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let reply = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(reply.as_bytes());
        }
    });
    format!("http://{addr}")
}

#[test]
fn non_success_status_is_an_error() {
    let base = serve(vec![("404 Not Found", "404: Not Found")]);
    let err = fetch_text(&format!("{base}/events/1.json")).expect_err("404 must fail");
    let msg = format!("{err:#}");
    assert!(msg.contains("404"), "status missing from error: {msg}");
}

#[test]
fn success_body_is_returned() {
    let base = serve(vec![("200 OK", "[]")]);
    let body = fetch_text(&format!("{base}/matches/55/282.json")).expect("200 should succeed");
    assert_eq!(body, "[]");
}

#[test]
fn remote_source_surfaces_missing_match_file() {
    let base = serve(vec![("404 Not Found", "404: Not Found")]);
    let source = OpenData::remote(base);
    let err = source.fetch_events(999).expect_err("missing file must fail");
    assert!(format!("{err:#}").contains("events request failed"));
}
