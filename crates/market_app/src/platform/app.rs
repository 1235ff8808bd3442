use std::io::{self, BufRead};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use market_core::{update, AppState, Effect, Location, Msg};
use market_engine::{EngineHandle, LocalStore, ReqwestMarketApi};
use market_logging::{market_debug, market_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::persistence;
use super::ui::commands::{Command, HELP};
use super::ui::render;
use super::Input;

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let api = ReqwestMarketApi::new(config.api_settings())
        .with_context(|| format!("building API client for {}", config.api_base_url))?;
    let (engine, events) =
        EngineHandle::spawn(Arc::new(api)).context("starting the engine thread")?;
    let store = LocalStore::open(config.store_dir.clone())?;

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let mut runner = EffectRunner::new(engine, store, input_tx.clone());
    runner.spawn_event_loop(events);
    spawn_stdin_reader(input_tx.clone());
    spawn_clock(input_tx, config.tick_interval());

    let cart = persistence::load_cart(runner.store());
    let mut state = dispatch(AppState::new(), Msg::RestoreCart(cart), &mut runner);

    let start = Location::parse(&config.start_location).to_string();
    market_info!("Starting at {}", start);
    runner.run(vec![Effect::Navigate { location: start }]);
    println!("type `help` for commands");

    while let Ok(input) = input_rx.recv() {
        match input {
            Input::Dispatch(msg) => state = dispatch(state, msg, &mut runner),
            Input::Line(line) => match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => println!("{HELP}"),
                Ok(Command::Go(raw)) => {
                    let location = Location::parse(&raw).to_string();
                    runner.run(vec![Effect::Navigate { location }]);
                }
                Ok(Command::Back) => {
                    if !runner.back() {
                        println!("no earlier location");
                    }
                }
                Ok(Command::Cart) => print!("{}", render::render_cart(&state.view())),
                Ok(command) => match command.into_msg() {
                    Some(msg) => state = dispatch(state, msg, &mut runner),
                    None => println!("frame ignored"),
                },
                Err(err) => println!("{err:#}"),
            },
            Input::EndOfInput => break,
        }
    }

    market_info!("Shutting down");
    Ok(())
}

/// Runs one message through `update`, executes its effects and redraws.
fn dispatch(state: AppState, msg: Msg, runner: &mut EffectRunner) -> AppState {
    let tick = matches!(msg, Msg::Tick { .. });
    if !tick {
        market_debug!("Msg {:?}", msg);
    }
    let (mut state, effects) = update(state, msg);
    runner.run(effects);

    if state.consume_dirty() {
        let view = state.view();
        if tick {
            // Only the countdown moves on a tick.
            if let Some(line) = render::render_countdown(&view) {
                println!("{line}");
            }
        } else {
            print!("{}", render::render(&view));
        }
    }
    state
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Input::EndOfInput);
    });
}

fn spawn_clock(input_tx: mpsc::Sender<Input>, interval: Duration) {
    thread::spawn(move || loop {
        let now = Utc::now().timestamp();
        if input_tx.send(Input::Dispatch(Msg::Tick { now })).is_err() {
            break;
        }
        thread::sleep(interval);
    });
}
