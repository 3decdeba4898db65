use crate::api::ApiClient;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::router::Router;
use crate::tui::Tui;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info};

/// Input poll timeout; also the redraw rate while requests are in flight.
const TICK: Duration = Duration::from_millis(100);

/// Main application: terminal, runtime and the router driving the screens.
pub struct App {
    tui: Tui,
    router: Router,
    // Dropped last: the dispatcher spawns onto it
    _runtime: Runtime,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let client = ApiClient::new(&config.api.base_url, config.api.timeout())
            .context("Failed to create API client")?;
        info!("Using restaurant API at {}", client.base_url());

        let dispatcher = Dispatcher::new(runtime.handle().clone(), client);
        let router = Router::new(config, dispatcher)?;
        let tui = Tui::new()?;
        Ok(Self {
            tui,
            router,
            _runtime: runtime,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        let result = self.event_loop();
        if let Err(e) = &result {
            error!("Event loop failed: {:#}", e);
        }
        self.tui.exit()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            let router = &mut self.router;
            let mut render_result = Ok(());
            self.tui.draw(|frame| render_result = router.render(frame))?;
            render_result?;

            if self.router.should_quit() {
                info!("Exiting");
                return Ok(());
            }

            if let Some(event) = self.tui.poll_event(TICK)? {
                self.router.handle_event(event)?;
            }
            self.router.pump()?;
            self.router.toasts_mut().tick();
        }
    }
}
