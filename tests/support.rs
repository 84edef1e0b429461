use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight caching-proxy stand-in. Paths starting with `/hit`
/// answer `X-Cache: HIT`, `/missing` answers 404, everything else is a `MISS`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_proxy_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Like [`spawn_proxy_server`], but skips when the sandbox forbids sockets.
///
/// # Errors
///
/// Returns an error for any bind failure other than a permission denial.
pub fn spawn_proxy_server_or_skip() -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_proxy_server() {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle_client(mut stream: TcpStream) {
    let mut buffer = [0u8; 1024];
    let Ok(read) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());
    let path = request.split_whitespace().nth(1).unwrap_or("/");

    let response: &[u8] = if path.starts_with("/hit") {
        b"HTTP/1.1 200 OK\r\nX-Cache: HIT\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK"
    } else if path.starts_with("/missing") {
        b"HTTP/1.1 404 Not Found\r\nX-Cache: MISS\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    } else {
        b"HTTP/1.1 200 OK\r\nX-Cache: MISS\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK"
    };

    if stream.write_all(response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Returns a `http://` URL whose port has nothing listening.
///
/// # Errors
///
/// Returns an error if a probe listener cannot be bound.
pub fn unused_local_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe listener failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

/// Run the `cacheload` binary inside `workdir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_cacheload<I, S>(workdir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = cacheload_bin()?;
    Command::new(bin)
        .args(args)
        .current_dir(workdir)
        .env("CACHELOAD_LOG", "error")
        .env_remove("RUST_LOG")
        .output()
        .map_err(|err| format!("run cacheload failed: {}", err))
}

fn cacheload_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_cacheload").map_or_else(
        || Err("CARGO_BIN_EXE_cacheload missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
