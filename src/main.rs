use anyhow::Result;
use cosmos_term::cli;
use cosmos_term::config::{Config, LogLevel};
use cosmos_term::error::RendererError;
use cosmos_term::pane::PaneId;
use cosmos_term::pty::{PtySessionManager, event_channel};
use cosmos_term::session::{PaneLifecycle, SessionController};
use cosmos_term::traits::{Geometry, Renderer, RendererEvent, RendererFactory};
use std::io::{Read, Write};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// ~60 Hz frame pacing
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Renderer that passes output straight through to this process's stdout.
///
/// The hosting terminal does the actual emulation, so the viewport is always
/// at the bottom and there is no accelerated backend.
struct StdoutRenderer {
    geometry: Geometry,
    stdout: std::io::Stdout,
}

impl Renderer for StdoutRenderer {
    fn write(&mut self, data: &[u8]) {
        let mut out = self.stdout.lock();
        if let Err(e) = out.write_all(data).and_then(|_| out.flush()) {
            log::error!("stdout write failed: {}", e);
        }
    }

    fn scroll_to_bottom(&mut self) {}

    fn viewport_y(&self) -> usize {
        0
    }

    fn base_y(&self) -> usize {
        0
    }

    fn rows(&self) -> u16 {
        self.geometry.rows
    }

    fn cols(&self) -> u16 {
        self.geometry.cols
    }

    fn resize(&mut self, rows: u16, cols: u16) {
        self.geometry = Geometry::new(rows, cols);
    }

    fn propose_geometry(&self) -> Option<Geometry> {
        Some(self.geometry)
    }

    fn enable_accelerated(&mut self) -> Result<(), RendererError> {
        Err(RendererError::AcceleratedUnavailable(
            "stdout passthrough".to_string(),
        ))
    }

    fn use_software(&mut self) {}

    fn focus(&mut self) {}

    fn dispose(&mut self) {
        let _ = self.stdout.lock().flush();
    }
}

struct StdoutFactory {
    geometry: Geometry,
}

impl RendererFactory for StdoutFactory {
    fn create(&mut self, _pane: PaneId) -> Box<dyn Renderer> {
        Box::new(StdoutRenderer {
            geometry: self.geometry,
            stdout: std::io::stdout(),
        })
    }
}

/// Forward stdin to the UI loop until EOF.
fn spawn_stdin_reader() -> Result<UnboundedReceiver<Vec<u8>>> {
    let (tx, rx) = unbounded_channel();
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let mut stdin = std::io::stdin();
            let mut buf = [0u8; 1024];
            loop {
                match stdin.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::debug!("stdin read failed: {}", e);
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

fn main() -> Result<()> {
    let options = cli::process_cli();

    let mut config = match &options.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    options.apply_to(&mut config)?;
    // StdoutRenderer has no accelerated backend to try.
    config.pipeline.accelerated_renderer = false;

    cosmos_term::debug::init_log_bridge(
        (config.log_level != LogLevel::Off).then_some(config.log_level),
    );
    log::info!("Starting cosmos-term {}", cosmos_term::VERSION);

    let cwd = match &options.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let project_name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cosmos-term".to_string());

    let runtime = Runtime::new()?;
    let (events_tx, mut events_rx) = event_channel();
    let manager = PtySessionManager::new(runtime.handle().clone(), events_tx);
    let factory = StdoutFactory {
        geometry: Geometry::new(config.shell.rows, config.shell.cols),
    };

    let mut controller = SessionController::new(manager.clone(), factory, config, project_name, cwd);
    let session = controller.create_session("shell", Instant::now());
    let pane = controller
        .session(session)
        .map(|s| s.active_pane_id)
        .ok_or_else(|| anyhow::anyhow!("session has no pane"))?;
    let mut input = spawn_stdin_reader()?;

    let exit_code = loop {
        let now = Instant::now();
        while let Ok(bytes) = input.try_recv() {
            controller.handle_renderer_event(pane, RendererEvent::Data(bytes), now);
        }
        controller.pump(&mut events_rx, now);
        controller.on_animation_frame(now);
        controller.tick(now);
        for update in controller.take_activity_updates() {
            log::info!("session {} activity: {:?}", update.session, update.transition);
        }

        match controller.pane(pane) {
            Some(p) => match p.lifecycle() {
                PaneLifecycle::Exited(code) if !p.has_pending_output() => {
                    break code.map_or(1, |c| c as i32);
                }
                PaneLifecycle::Inert => {
                    eprintln!("cosmos-term: failed to start shell (see log)");
                    break 1;
                }
                _ => {}
            },
            None => break 1,
        }
        std::thread::sleep(FRAME_INTERVAL);
    };

    log::info!("Shell exited with {}, shutting down", exit_code);
    drop(controller);
    manager.kill_all();
    runtime.shutdown_timeout(Duration::from_secs(2));
    std::process::exit(exit_code);
}
