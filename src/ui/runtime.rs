use crate::config::Config;
use crate::serial::{SerialSettings, SerialTransport};
use crate::shutdown::{ShutdownCoordinator, ShutdownPhase};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use tracing::{debug, info};

/// Run the TUI until the user quits or a termination signal arrives.
///
/// This loop is the only place the session changes: every key press,
/// tick and transport event is handled here one at a time.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let coordinator = ShutdownCoordinator::new();
    let mut events = EventHandler::new(config.ui.tick_rate(), coordinator.handle());

    let settings = SerialSettings {
        port: config.serial.port.clone(),
        read_timeout: config.serial.read_timeout(),
    };
    let transport = SerialTransport::new(settings, events.sender());
    let mut app = App::new(Box::new(transport), &config);

    let (mut terminal, guard) = setup_terminal()?;
    info!(port = %app.port_label(), baud = %app.session().baud_rate, "serialterm started");

    if config.serial.connect_on_start {
        app.connect();
    }

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            AppEvent::Key(key) => handle_key(&mut app, key),
            AppEvent::Resize(cols, rows) => debug!(cols, rows, "terminal resized"),
            AppEvent::Tick => app.on_tick(),
            AppEvent::Transport { link, event } => app.on_transport_event(link, event),
            AppEvent::Shutdown => app.request_quit(),
        }
    }

    coordinator.signal();
    coordinator.advance(ShutdownPhase::ClosingLink);
    app.shutdown();

    // The terminal goes back to the user before the transport is dropped.
    coordinator.advance(ShutdownPhase::RestoringTerminal);
    drop(terminal);
    drop(guard);
    drop(app);

    coordinator.advance(ShutdownPhase::Complete);
    Ok(())
}
