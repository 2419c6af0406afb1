use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::key_hint;
use crate::key_hint::Action;
use crate::project_filter::ProjectFilterView;
use crate::tui::AltScreenGuard;
use crate::tui::Tui;

pub(crate) struct App {
    view: ProjectFilterView,
    app_event_tx: AppEventSender,
    needs_redraw: bool,
    exit: bool,
}

impl App {
    pub(crate) fn new(view: ProjectFilterView, app_event_tx: AppEventSender) -> Self {
        Self {
            view,
            app_event_tx,
            needs_redraw: true,
            exit: false,
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        let Some(action) = key_hint::action_for(key) else {
            return;
        };
        match action {
            Action::NextCategory => self.view.select_next_category(),
            Action::PreviousCategory => self.view.select_previous_category(),
            Action::ScrollDown => self.view.scroll_down(),
            Action::ScrollUp => self.view.scroll_up(),
            Action::Retry => self.view.retry(),
            Action::Quit => self.app_event_tx.send(AppEvent::ExitRequest),
        }
        self.needs_redraw = true;
    }

    pub(crate) fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ProjectsLoaded { token, outcome } => {
                self.view.on_fetch_finished(token, outcome);
                self.needs_redraw = true;
            }
            AppEvent::RequestRedraw => self.needs_redraw = true,
            AppEvent::ExitRequest => self.exit = true,
        }
    }
}

/// Mount the view and drive it until the user quits.
pub(crate) async fn run(
    tui: &mut Tui,
    mut app: App,
    app_event_rx: UnboundedReceiver<AppEvent>,
) -> std::io::Result<()> {
    let mut alt = AltScreenGuard::enter(tui);
    app.view.mount();

    let mut term_events = EventStream::new().fuse();
    let mut app_events = UnboundedReceiverStream::new(app_event_rx).fuse();

    loop {
        if app.needs_redraw {
            alt.tui.draw(&app.view)?;
            app.needs_redraw = false;
        }
        if app.exit {
            break;
        }

        tokio::select! {
            Some(event) = term_events.next() => {
                match event? {
                    Event::Key(key) => app.handle_key(key),
                    Event::Resize(_, _) => app.needs_redraw = true,
                    _ => {}
                }
            }
            Some(event) = app_events.next() => app.handle_app_event(event),
            else => break,
        }
    }

    app.view.cancel_pending();
    tracing::info!("exiting");
    Ok(())
}
