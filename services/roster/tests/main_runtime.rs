use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::time::{Duration, Instant};

fn spawn_roster() -> std::process::Child {
    let bin = std::env::var("CARGO_BIN_EXE_bastion-roster").unwrap_or_else(|_| {
        let current = std::env::current_exe().expect("current exe");
        let debug_dir = current
            .parent()
            .and_then(|p| p.parent())
            .expect("target debug dir");
        debug_dir
            .join("bastion-roster")
            .to_string_lossy()
            .to_string()
    });
    let mut cmd = Command::new(bin);
    cmd.env("BASTION_ROSTER_BIND", "127.0.0.1:0")
        .env("BASTION_ROSTER_METRICS_BIND", "127.0.0.1:0")
        .env_remove("BASTION_ROSTER_CONFIG")
        .env("RUST_LOG", "info")
        .env("NO_COLOR", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    cmd.spawn().expect("spawn roster")
}

/// Follow the log until the API listener reports its bound address.
fn listening_addr(child: &mut std::process::Child, timeout: Duration) -> SocketAddr {
    let stdout = child.stdout.take().expect("piped stdout");
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            if !line.contains("roster listening") {
                continue;
            }
            let Some(start) = line.find("127.0.0.1:") else {
                continue;
            };
            let addr: String = line[start..]
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ':')
                .collect();
            let _ = tx.send(addr);
        }
    });
    rx.recv_timeout(timeout)
        .expect("listening log line")
        .parse()
        .expect("socket addr")
}

fn get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("read timeout");
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
    )
    .expect("write request");
    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read response");
    response
}

fn stop_with_sigint(child: &mut std::process::Child) {
    let pid = child.id().to_string();
    let status = Command::new("kill")
        .arg("-INT")
        .arg(pid)
        .status()
        .expect("send SIGINT");
    assert!(status.success());
}

fn wait_for_exit(child: &mut std::process::Child, timeout: Duration) -> std::process::ExitStatus {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().expect("try_wait") {
            return status;
        }
        if Instant::now() >= deadline {
            child.kill().expect("kill on timeout");
            return child.wait().expect("wait after kill");
        }
        std::thread::sleep(Duration::from_millis(25));
    }
}

#[test]
fn binary_serves_seeded_roster_and_stops_on_sigint() {
    let mut child = spawn_roster();
    let addr = listening_addr(&mut child, Duration::from_secs(5));

    let health = get(addr, "/health");
    assert!(health.starts_with("HTTP/1.1 200"), "{health}");
    assert!(health.contains("\"backend\":\"memory\""), "{health}");

    let employees = get(addr, "/employees");
    assert!(employees.starts_with("HTTP/1.1 200"), "{employees}");
    assert!(employees.contains("Gandalf"), "{employees}");

    let items = get(addr, "/items");
    assert!(items.starts_with("HTTP/1.1 401"), "{items}");
    assert!(items.contains("WWW-Authenticate") || items.contains("www-authenticate"));

    stop_with_sigint(&mut child);
    let status = wait_for_exit(&mut child, Duration::from_secs(3));
    assert!(status.success());
}
