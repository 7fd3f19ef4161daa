use crate::{
    api::HttpTransport,
    clipboard::SystemClipboard,
    config::Config,
    errors::MurmurResult,
    key_handlers::{handle_action, map_key},
    speech::VoiceInput,
    ui,
    widget::{ChatWidget, WidgetEvent},
};
use crossterm::{
    event::{Event as CEvent, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, sync::Arc};
use tokio::sync::mpsc::UnboundedReceiver;

/// Builds the widget from config and runs it until the user quits.
pub async fn run(config: &Config) -> MurmurResult<()> {
    let transport = HttpTransport::new(&config.endpoint);
    info!("Chatting with {}", transport.url());

    let voice = VoiceInput::detect(&config.speech_command);
    let (mut widget, mut events) = ChatWidget::new(
        Arc::new(transport),
        Arc::new(SystemClipboard),
        voice,
        config.locale.clone(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut widget, &mut events).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    widget: &mut ChatWidget,
    events: &mut UnboundedReceiver<WidgetEvent>,
) -> MurmurResult<()> {
    let mut input = EventStream::new();

    loop {
        terminal.draw(|f| ui::draw(f, widget))?;

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(CEvent::Key(key))) => {
                    if let Some(action) = map_key(key) {
                        if handle_action(widget, action) {
                            break;
                        }
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = events.recv() => widget.handle_event(event),
        }
    }

    Ok(())
}
