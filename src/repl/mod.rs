//! REPL Module
//!
//! Line-oriented command interpreter: read a line, parse it, run it against
//! the session, repeat until `exit`, end of input or shutdown.

pub mod commands;
pub mod session;

use std::future::Future;
use std::io::{BufRead, Write};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::Result;

pub use commands::{Command, CommandError, COMMANDS};
pub use session::{Flow, Session};

/// Prompt printed before each line is read
pub const PROMPT: &str = "Pokedex > ";

/// Lines buffered between the reader thread and the REPL
const LINE_BUFFER: usize = 16;

// == Line Reader ==
/// Reads `input` line by line on a dedicated OS thread and forwards each line.
///
/// The thread sits outside the Tokio runtime, so a read that never completes
/// does not hold up runtime shutdown. It ends at end of input, on a read
/// error, or once the receiver is dropped.
pub fn spawn_line_reader<R>(input: R) -> Result<mpsc::Receiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);

    thread::Builder::new()
        .name("line-reader".into())
        .spawn(move || {
            for line in input.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!("Failed to read input: {}", err);
                        break;
                    }
                };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            debug!("Line reader stopped");
        })?;

    Ok(rx)
}

// == Run ==
/// Drives `session` from `lines` until `exit` or the sender side closes.
pub async fn run<W: Write>(
    session: &mut Session,
    mut lines: mpsc::Receiver<String>,
    out: &mut W,
) -> Result<()> {
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.recv().await else {
            debug!("Input closed");
            writeln!(out)?;
            break;
        };

        match Command::parse(&line) {
            Ok(command) => {
                if session.execute(command, out).await? == Flow::Exit {
                    break;
                }
            }
            Err(CommandError::Empty) => {}
            Err(err) => writeln!(out, "{}", err)?,
        }
    }

    Ok(())
}

// == Run Until ==
/// Same as [`run`], but returns as soon as `shutdown` completes, even while
/// waiting for a line.
pub async fn run_until<W, F>(
    session: &mut Session,
    lines: mpsc::Receiver<String>,
    out: &mut W,
    shutdown: F,
) -> Result<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    tokio::select! {
        result = run(session, lines, out) => result,
        _ = shutdown => {
            debug!("REPL interrupted");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PokeApiClient;
    use crate::cache::TimedCache;
    use std::io::{BufReader, Cursor, Read};
    use std::sync::mpsc as std_mpsc;
    use std::time::Duration;

    /// Input that blocks forever, like a terminal nobody types into.
    struct StalledInput;

    impl Read for StalledInput {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            loop {
                thread::park();
            }
        }
    }

    fn offline_session() -> Session {
        let cache = TimedCache::new(Duration::from_secs(60));
        Session::new(PokeApiClient::new("http://127.0.0.1:9", cache), 20)
    }

    async fn drive(input: &str) -> String {
        let mut session = offline_session();
        let mut out = Vec::new();
        let lines = spawn_line_reader(Cursor::new(input.to_owned())).unwrap();
        run(&mut session, lines, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_exit_ends_loop() {
        let out = drive("exit\npokedex\n").await;

        assert_eq!(out, PROMPT);
    }

    #[tokio::test]
    async fn test_end_of_input_ends_loop() {
        let out = drive("pokedex\n").await;

        assert_eq!(
            out,
            format!("{}You caught no pokemons yet\n{}\n", PROMPT, PROMPT)
        );
    }

    #[tokio::test]
    async fn test_blank_and_bad_lines() {
        let out = drive("\nteleport\nexplore\nexit\n").await;

        assert_eq!(
            out,
            format!(
                "{p}{p}Unknown command: teleport. Type 'help' for usage\n{p}No location area name specified\n{p}",
                p = PROMPT
            )
        );
    }

    #[tokio::test]
    async fn test_lines_without_trailing_newline() {
        let out = drive("pokedex").await;

        assert_eq!(
            out,
            format!("{}You caught no pokemons yet\n{}\n", PROMPT, PROMPT)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_interrupts_pending_read() {
        let mut session = offline_session();
        let mut out = Vec::new();
        // Sender kept alive: the REPL waits for a line that never comes
        let (_tx, lines) = mpsc::channel::<String>(1);

        run_until(
            &mut session,
            lines,
            &mut out,
            tokio::time::sleep(Duration::from_millis(10)),
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), PROMPT);
    }

    #[tokio::test]
    async fn test_lines_before_shutdown_still_run() {
        let mut session = offline_session();
        let mut out = Vec::new();
        let (tx, lines) = mpsc::channel(4);
        tx.send("pokedex".to_string()).await.unwrap();

        run_until(
            &mut session,
            lines,
            &mut out,
            tokio::time::sleep(Duration::from_millis(200)),
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}You caught no pokemons yet\n{}", PROMPT, PROMPT)
        );
    }

    #[test]
    fn test_runtime_exits_while_reader_blocked() {
        let (done_tx, done_rx) = std_mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                let mut session = offline_session();
                let mut out = Vec::new();
                let lines = spawn_line_reader(BufReader::new(StalledInput)).unwrap();

                run_until(&mut session, lines, &mut out, async {})
                    .await
                    .unwrap();
            });

            // A read on the runtime's blocking pool would stall this drop
            drop(runtime);
            done_tx.send(()).unwrap();
        });

        assert!(
            done_rx.recv_timeout(Duration::from_secs(5)).is_ok(),
            "Runtime did not shut down while input was pending"
        );
    }
}
