use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Service response body for a video with the given title
pub fn document_json(title: &str) -> String {
    serde_json::json!({
        "metadata": {
            "title": title,
            "thumbnail": "https://i.ytimg.com/vi/x/hq.jpg",
            "upload_date": "20240131",
            "uploader": "Some Channel",
            "channel_url": "https://www.youtube.com/@some",
            "view_count": 125000,
            "like_count": 4200,
            "categories": ["Education"],
            "duration": 1830
        },
        "summary": {
            "video_summary": format!("## {}\nWorth it.", title),
            "people": [{"name": "Ada", "background": "Researcher"}]
        }
    })
    .to_string()
}

/// Serve one scripted `(status, body)` reply per connection, in order.
///
/// Returns the endpoint URL and a handle yielding the raw requests received.
pub async fn spawn_service(replies: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in replies {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);

            let response = format!(
                "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                if status < 400 { "OK" } else { "Error" },
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        }
        requests
    });

    (format!("http://{}/analyze", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
