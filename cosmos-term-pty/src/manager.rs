//! `portable-pty` implementation of [`ProcessBackend`].
//!
//! Each spawned process owns:
//! - the PTY master (kept for resize) and its writer (kept for input)
//! - a reader thread forwarding output chunks as [`BackendEvent::Output`]
//! - a waiter thread reporting [`BackendEvent::Exited`] with the exit code,
//!   sent after the reader has drained (bounded wait)
//!
//! Spawning runs on the tokio blocking pool so the UI thread never waits on
//! `openpty`/`fork`; the outcome is pushed as [`BackendEvent::Spawned`]
//! before the reader and waiter start, so every `Output`/`Exited` event for a
//! handle follows its `Spawned` event on the channel.

use crate::backend::{
    BackendEvent, BackendEventSender, ProcessBackend, ProcessHandle, SpawnRequest, SpawnedProcess,
};
use crate::error::PtyError;
use crate::shell::{default_shell, normalize_shell_path};
use parking_lot::Mutex;
use portable_pty::{Child, ChildKiller, CommandBuilder, MasterPty, PtySize, native_pty_system};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Handle;

const READ_CHUNK_SIZE: usize = 4096;

/// How long the waiter lets the reader drain after the child exits, so the
/// last output is queued before the exit notification.
const READER_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// A live process and the PTY resources it owns.
struct PtyProcess {
    writer: Option<Box<dyn Write + Send>>,
    master: Option<Box<dyn MasterPty + Send>>,
    killer: Box<dyn ChildKiller + Send + Sync>,
    pid: u32,
}

impl PtyProcess {
    /// Kill the child and tear down its PTY.
    ///
    /// The reader thread is detached: it ends on its own once the slave side
    /// closes, and a grandchild holding the slave open must not block us.
    fn shutdown(mut self, handle: ProcessHandle) {
        if let Err(e) = self.killer.kill() {
            log::debug!("kill({}) pid {}: {}", handle, self.pid, e);
        }
        self.writer.take();
        self.master.take();
    }
}

/// Output and exit sources of a freshly spawned process, not yet watched.
struct ProcessIo {
    reader: Box<dyn Read + Send>,
    child: Box<dyn Child + Send + Sync>,
}

struct Inner {
    processes: Mutex<HashMap<ProcessHandle, PtyProcess>>,
    next_handle: AtomicU64,
    events: BackendEventSender,
}

/// Owns every PTY-backed process spawned for the session core.
#[derive(Clone)]
pub struct PtySessionManager {
    inner: Arc<Inner>,
    runtime: Handle,
}

impl PtySessionManager {
    /// Create a manager that spawns on `runtime` and pushes events to `events`.
    pub fn new(runtime: Handle, events: BackendEventSender) -> Self {
        Self {
            inner: Arc::new(Inner {
                processes: Mutex::new(HashMap::new()),
                next_handle: AtomicU64::new(1),
                events,
            }),
            runtime,
        }
    }

    /// Number of live processes.
    pub fn process_count(&self) -> usize {
        self.inner.processes.lock().len()
    }

    /// Child pid for a live process.
    pub fn pid(&self, handle: ProcessHandle) -> Option<u32> {
        self.inner.processes.lock().get(&handle).map(|p| p.pid)
    }

    /// Kill every live process.
    pub fn kill_all(&self) {
        // Drain first so the map lock is not held while signalling children.
        let drained: Vec<(ProcessHandle, PtyProcess)> =
            self.inner.processes.lock().drain().collect();
        log::info!("Killing {} PTY processes", drained.len());
        for (handle, process) in drained {
            process.shutdown(handle);
        }
    }
}

impl Inner {
    fn spawn_process(
        &self,
        request: &SpawnRequest,
    ) -> Result<(SpawnedProcess, ProcessIo), PtyError> {
        let pair = native_pty_system()
            .openpty(PtySize {
                rows: request.rows,
                cols: request.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| PtyError::OpenPty(e.to_string()))?;

        let mut cmd = if request.login_shell {
            CommandBuilder::new_default_prog()
        } else {
            let shell = normalize_shell_path(request.shell.clone())?.unwrap_or_else(default_shell);
            let mut builder = CommandBuilder::new(&shell);
            #[cfg(target_os = "windows")]
            if shell.to_lowercase().contains("powershell") {
                builder.arg("-NoLogo");
            }
            builder.args(&request.args);
            builder
        };
        cmd.cwd(&request.cwd);
        cmd.env("TERM", "xterm-256color");
        cmd.env("COLORTERM", "truecolor");

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| PtyError::Spawn(e.to_string()))?;
        // Only the master side is needed from here on.
        drop(pair.slave);

        let pid = child.process_id().unwrap_or(0);
        let killer = child.clone_killer();
        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| PtyError::Spawn(format!("failed to clone PTY reader: {e}")))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| PtyError::Spawn(format!("failed to take PTY writer: {e}")))?;

        let handle = ProcessHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.processes.lock().insert(
            handle,
            PtyProcess {
                writer: Some(writer),
                master: Some(pair.master),
                killer,
                pid,
            },
        );

        log::info!(
            "Spawned {} (pid {}) for pane {} at {}x{}",
            handle,
            pid,
            request.pane,
            request.cols,
            request.rows
        );
        Ok((SpawnedProcess { handle, pid }, ProcessIo { reader, child }))
    }

    /// Start the reader and waiter threads for a process whose `Spawned`
    /// event is already queued, so none of its events can overtake it.
    fn start_io(&self, handle: ProcessHandle, io: ProcessIo) -> std::io::Result<()> {
        let ProcessIo { reader, mut child } = io;

        let events = self.events.clone();
        let (drained_tx, drained_rx) = mpsc::sync_channel::<()>(1);
        std::thread::Builder::new()
            .name(format!("{handle}-reader"))
            .spawn(move || {
                reader_loop(handle, reader, events);
                let _ = drained_tx.send(());
            })?;

        let events = self.events.clone();
        std::thread::Builder::new()
            .name(format!("{handle}-waiter"))
            .spawn(move || {
                let code = match child.wait() {
                    Ok(status) => Some(status.exit_code()),
                    Err(e) => {
                        log::debug!("wait({}) failed: {}", handle, e);
                        None
                    }
                };
                log::info!("Process {} exited with {:?}", handle, code);
                // A grandchild may keep the slave open; do not wait forever.
                if drained_rx.recv_timeout(READER_DRAIN_TIMEOUT).is_err() {
                    log::debug!("Reader for {} still running after exit", handle);
                }
                let _ = events.send(BackendEvent::Exited { handle, code });
            })?;
        Ok(())
    }
}

fn reader_loop(handle: ProcessHandle, mut reader: Box<dyn Read + Send>, events: BackendEventSender) {
    let mut buf = [0u8; READ_CHUNK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                let event = BackendEvent::Output {
                    handle,
                    data: buf[..n].to_vec(),
                };
                if events.send(event).is_err() {
                    // Receiver gone: the session core has shut down.
                    break;
                }
            }
            Err(e) => {
                // EIO is the normal end-of-stream on Linux once the child exits.
                log::debug!("Reader for {} stopped: {}", handle, e);
                break;
            }
        }
    }
}

impl ProcessBackend for PtySessionManager {
    fn spawn(&self, request: SpawnRequest) {
        let inner = Arc::clone(&self.inner);
        self.runtime.spawn_blocking(move || {
            let pane = request.pane;
            let (result, io) = match inner.spawn_process(&request) {
                Ok((spawned, io)) => (Ok(spawned), Some(io)),
                Err(e) => {
                    log::error!("Spawn for pane {} failed: {}", pane, e);
                    (Err(e), None)
                }
            };
            let spawned = result.as_ref().ok().copied();

            if inner
                .events
                .send(BackendEvent::Spawned { pane, result })
                .is_err()
            {
                // Nobody is left to bind the process; do not leak it.
                if let Some(spawned) = spawned
                    && let Some(process) = inner.processes.lock().remove(&spawned.handle)
                {
                    process.shutdown(spawned.handle);
                }
                return;
            }

            if let (Some(spawned), Some(io)) = (spawned, io)
                && let Err(e) = inner.start_io(spawned.handle, io)
            {
                log::error!("Failed to start I/O threads for {}: {}", spawned.handle, e);
                if let Some(process) = inner.processes.lock().remove(&spawned.handle) {
                    process.shutdown(spawned.handle);
                }
                let _ = inner.events.send(BackendEvent::Exited {
                    handle: spawned.handle,
                    code: None,
                });
            }
        });
    }

    fn write(&self, handle: ProcessHandle, data: &[u8]) -> Result<(), PtyError> {
        let mut processes = self.inner.processes.lock();
        let process = processes
            .get_mut(&handle)
            .ok_or(PtyError::NotFound(handle))?;
        let writer = process.writer.as_mut().ok_or(PtyError::Closed(handle))?;
        writer.write_all(data)?;
        writer.flush()?;
        Ok(())
    }

    fn resize(&self, handle: ProcessHandle, rows: u16, cols: u16) -> Result<(), PtyError> {
        let processes = self.inner.processes.lock();
        let process = processes.get(&handle).ok_or(PtyError::NotFound(handle))?;
        let master = process.master.as_ref().ok_or(PtyError::Closed(handle))?;
        master
            .resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| PtyError::Resize(e.to_string()))
    }

    fn kill(&self, handle: ProcessHandle) -> Result<(), PtyError> {
        let process = self
            .inner
            .processes
            .lock()
            .remove(&handle)
            .ok_or(PtyError::NotFound(handle))?;
        process.shutdown(handle);
        Ok(())
    }
}
