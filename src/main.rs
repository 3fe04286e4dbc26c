use fractal_zoom::{
    BusyObserver, Complex, ControlSurface, LogPresenter, ParameterEdit, PointerButton,
    RenderingSurface, Session, SessionConfig, SessionPorts, SessionStatus, StatusSink,
};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const RECOMPUTE_TIMEOUT: Duration = Duration::from_secs(120);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let presenter = Arc::new(LogPresenter::new());
    let ports = SessionPorts {
        rendering: Arc::clone(&presenter) as Arc<dyn RenderingSurface>,
        control: Arc::clone(&presenter) as Arc<dyn ControlSurface>,
        busy_observer: Some(Arc::clone(&presenter) as Arc<dyn BusyObserver>),
    };

    let session = Arc::new(Session::new(SessionConfig::default(), ports));
    let _timers = session.spawn_timer_driver();
    let _indicator = session.spawn_busy_indicator(Arc::clone(&presenter) as Arc<dyn StatusSink>);

    session.refresh();
    wait_idle(&session)?;

    let seahorse_valley = Complex::new(-0.745, 0.113);
    for button in [PointerButton::Primary, PointerButton::Primary, PointerButton::Secondary] {
        let outcome = session.on_click(seahorse_valley, button);
        log::info!("{button:?} click at {seahorse_valley:?}: {outcome:?}");
        wait_idle(&session)?;
    }

    let current = session.control_values();
    session.on_parameter_change(ParameterEdit {
        iterations: current.iterations,
        power: 3,
        escape_radius: 4.0,
    });
    wait_for_debounced(&session)?;

    log::info!(
        "{} after {} evaluations ({} failed)",
        session.model().title(),
        session.completed_evaluations(),
        session.failed_evaluations()
    );

    Ok(())
}

fn wait_idle(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    if session.wait_idle(RECOMPUTE_TIMEOUT) {
        Ok(())
    } else {
        Err("recompute did not finish in time".into())
    }
}

fn wait_for_debounced(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    while session.status() != SessionStatus::Idle {
        if start.elapsed() > RECOMPUTE_TIMEOUT {
            return Err("debounced recompute did not finish in time".into());
        }
        thread::sleep(Duration::from_millis(50));
    }

    Ok(())
}
