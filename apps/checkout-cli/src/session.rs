//! # Checkout Session
//!
//! The controller loop: owns the checkout state, reads one command per
//! line, applies it and redraws the form.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start()                                                                │
//! │    begin_load ──► render "Loading catalog..." ──► fetch ──► render form │
//! │                                                                         │
//! │  run(input)                                                             │
//! │    ┌──► read line ──► Command::from_str ──► dispatch ──► render ──┐     │
//! │    │                        │                   │                 │     │
//! │    │                        └──── "! message" ◄─┘ (rejected)      │     │
//! │    └──────────────────────────────────────────────────────────────┘     │
//! │                                                                         │
//! │  EOF or `quit` ends the loop.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogLoader, CatalogProvider};
use crate::commands::{self, Command, Flow};
use crate::error::{AppError, ErrorCode};
use crate::state::{CheckoutState, ConfigState};
use crate::view::{self, CheckoutView};

/// One interactive checkout.
pub struct Session<P, W> {
    state: CheckoutState,
    loader: CatalogLoader<P>,
    config: ConfigState,
    out: W,
}

impl<P: CatalogProvider, W: Write> Session<P, W> {
    pub fn new(config: ConfigState, loader: CatalogLoader<P>, out: W) -> Self {
        Session {
            state: CheckoutState::new(config.total_policy),
            loader,
            config,
            out,
        }
    }

    /// Loads the catalog, drawing the loading indicator first.
    pub async fn start(&mut self) -> Result<(), AppError> {
        self.load_catalog().await
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Blank lines and lines starting with `#` are skipped, so command
    /// scripts can carry comments.
    pub async fn run<R>(&mut self, input: R) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if self.handle_line(line).await? == Flow::Exit {
                break;
            }
        }

        info!("Session ended");
        Ok(())
    }

    /// Applies one input line.
    ///
    /// User errors are printed as notices; only I/O failures are returned.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow, AppError> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                self.notice(&e)?;
                return Ok(Flow::Continue);
            }
        };

        match self.dispatch(command).await {
            Ok(Flow::Exit) => Ok(Flow::Exit),
            Ok(Flow::Continue) => {
                if command.redraws() {
                    self.render()?;
                }
                Ok(Flow::Continue)
            }
            Err(e) if e.code == ErrorCode::Internal => Err(e),
            Err(e) => {
                self.notice(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow, AppError> {
        debug!(?command, "Dispatching command");

        match command {
            Command::Add(id) => {
                commands::order::add_to_order(&mut self.state, id)?;
            }
            Command::Remove(id) => {
                commands::order::remove_from_order(&mut self.state, id)?;
            }
            Command::Show => {}
            Command::Reload => {
                self.state.begin_load()?;
                self.render()?;
                commands::catalog::complete_load(&mut self.state, &self.loader).await;
            }
            Command::Help => {
                writeln!(self.out, "{}", commands::HELP)?;
            }
            Command::Quit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    async fn load_catalog(&mut self) -> Result<(), AppError> {
        self.state.begin_load()?;
        self.render()?;

        commands::catalog::complete_load(&mut self.state, &self.loader).await;
        self.render()
    }

    /// Redraws the whole form.
    pub fn render(&mut self) -> Result<(), AppError> {
        let view = CheckoutView::build(&self.state, &self.config);
        writeln!(self.out)?;
        view::render_text(&view, &self.config, &mut self.out)?;
        Ok(())
    }

    fn notice(&mut self, err: &AppError) -> Result<(), AppError> {
        if err.is_rejection() || err.code == ErrorCode::InvalidCommand {
            debug!(code = ?err.code, "{}", err.message);
        } else {
            warn!(code = ?err.code, "{}", err.message);
        }

        writeln!(self.out, "! {}", err.message)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RetryPolicy, StaticProvider};
    use checkout_core::ProductId;
    use std::time::Duration;

    const CATALOG: &str = r#"[
        {"id": 1, "name": "Headphones", "availableCount": 2, "price": 50},
        {"id": 2, "name": "Charger", "availableCount": 10, "price": 30}
    ]"#;

    fn retry(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(10),
        }
    }

    fn session(provider: StaticProvider) -> Session<StaticProvider, Vec<u8>> {
        Session::new(
            ConfigState::default(),
            CatalogLoader::new(provider, retry(0)),
            Vec::new(),
        )
    }

    fn output(session: Session<StaticProvider, Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[tokio::test]
    async fn test_start_renders_loading_then_form() {
        let mut session = session(StaticProvider::from_json(CATALOG).unwrap());
        session.start().await.unwrap();

        let text = output(session);
        let loading = text.find("Loading catalog...").unwrap();
        let table = text.find("Headphones").unwrap();
        assert!(loading < table);
    }

    #[tokio::test]
    async fn test_script_builds_order() {
        let mut session = session(StaticProvider::from_json(CATALOG).unwrap());
        session.start().await.unwrap();

        let script = "# two headphones, three chargers\n+ 1\n+1\nadd 2\nadd 2\n\nadd 2\n";
        session.run(script.as_bytes()).await.unwrap();

        assert_eq!(session.state().order().quantity_of(ProductId::new(1)), 2);
        assert_eq!(session.state().order().quantity_of(ProductId::new(2)), 3);
        assert!(output(session).ends_with("Order summary\n  Total: $190.00\n"));
    }

    #[tokio::test]
    async fn test_rejections_are_notices() {
        let mut session = session(StaticProvider::from_json(CATALOG).unwrap());
        session.start().await.unwrap();

        session
            .run("- 1\n+ 1\n+ 1\n+ 1\nfly 3\n".as_bytes())
            .await
            .unwrap();

        assert_eq!(session.state().order().quantity_of(ProductId::new(1)), 2);
        let text = output(session);
        assert!(text.contains("! Product 1 is not in the order"));
        assert!(text.contains("! Product 1 is out of stock: only 2 available"));
        assert!(text.contains("! Unknown command 'fly 3'"));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mut session = session(StaticProvider::from_json(CATALOG).unwrap());
        session.start().await.unwrap();

        session.run("+ 2\nquit\n+ 2\n".as_bytes()).await.unwrap();
        assert_eq!(session.state().order().quantity_of(ProductId::new(2)), 1);
    }

    #[tokio::test]
    async fn test_reload_after_failure() {
        let provider = StaticProvider::from_json(CATALOG).unwrap().failing_first(1);
        let mut session = session(provider);
        session.start().await.unwrap();

        session.run("+ 1\nreload\n+ 1\n".as_bytes()).await.unwrap();

        assert_eq!(session.state().order().quantity_of(ProductId::new(1)), 1);
        let text = output(session);
        assert!(text.contains("Catalog unavailable"));
        assert!(text.contains("! Catalog is unavailable; use `reload` to try again"));
    }

    #[tokio::test]
    async fn test_reload_when_ready_is_refused() {
        let mut session = session(StaticProvider::from_json(CATALOG).unwrap());
        session.start().await.unwrap();
        session.run("+ 1\nreload\n".as_bytes()).await.unwrap();

        // The order survives
        assert_eq!(session.state().order().quantity_of(ProductId::new(1)), 1);
        assert!(output(session).contains("! Catalog is already loaded"));
    }
}
