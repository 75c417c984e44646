use crate::api::CharacterApi;
use crate::config::Config;
use crate::connectivity::TcpProbe;
use crate::messages::MessageCatalog;
use crate::state::{DetailFetchController, FetchContext, ListFetchController};
use crate::view::{self, TerminalView};
use anyhow::Result;
use log::*;
use std::io;
use std::sync::Arc;

/// Oversees controller setup and the screens shown on the terminal.
///
pub struct App {
    context: FetchContext,
    retries: usize,
}

impl App {
    /// Start a new application according to the given configuration, showing
    /// the character list and then the given character, if any.
    ///
    pub async fn start(config: Config, character_id: Option<String>) -> Result<()> {
        info!("Starting application...");
        let api = CharacterApi::new(&config.endpoint, config.request_timeout())?;
        let probe = TcpProbe::for_endpoint(&config.endpoint, config.connectivity_timeout())?;
        let messages = MessageCatalog::new(&config.messages);
        let app = App {
            context: FetchContext::new(Arc::new(api), Arc::new(probe), Arc::new(messages))
                .with_delay(config.fetch_delay()),
            retries: config.retry_attempts,
        };

        let mut view = TerminalView::new(io::stdout());
        app.show_characters(&mut view).await?;
        if let Some(id) = character_id {
            app.show_character(&id, &mut view).await?;
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Run the list screen until it settles.
    ///
    async fn show_characters<W: io::Write>(&self, view: &mut TerminalView<W>) -> Result<()> {
        debug!("Opening characters list screen...");
        let controller = ListFetchController::new(self.context.clone());
        view::show_list(&controller, view, self.retries).await?;
        controller.shutdown();
        Ok(())
    }

    /// Run the detail screen for one character, clearing it on the way out.
    ///
    async fn show_character<W: io::Write>(&self, id: &str, view: &mut TerminalView<W>) -> Result<()> {
        debug!("Opening details screen for character {}...", id);
        let controller = DetailFetchController::new(self.context.clone());
        let result = view::show_detail(&controller, id, view, self.retries).await;
        controller.clear();
        result?;
        Ok(())
    }
}
