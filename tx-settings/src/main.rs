//! Line-driven shell over the settings handlers.
//!
//! Each input line is one UI event, e.g. `slippage 0,5`, `preset 3`,
//! `deadline 15`, `gwei 30`, `gas fast`, `blur`, `save`. `help` lists them.

use std::io::{self, BufRead, Write};

use tx_settings::handlers::{self, SharedSettings};
use tx_settings::model::gas::GasPriceTier;
use tx_settings::model::slippage::Preset;
use tx_settings::{logger, AppError, Result, SettingsConfig};

const HELP: &str = "\
commands:
  preset <1|2|3>           select a slippage preset
  slippage [percent]       type into the custom slippage box
  deadline [minutes]       type into the deadline box
  gwei [amount]            type into the custom gas price box
  gas <instant|fast|normal>
  gas-clear <tier>         double-click a gas tier
  multihop                 toggle multihop routing
  network <mainnet|other>  switch network
  blur                     leave all input boxes
  show | save | reset | quit";

fn main() -> Result<()> {
    let config = SettingsConfig::from_env()?;
    let _guard = logger::init(&config);

    let state = handlers::load_settings(config);
    print_state(&state);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let (command, arg) = match line.trim_start().split_once(' ') {
            Some((command, arg)) => (command, arg),
            None => (line.trim(), ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            other => {
                if let Err(e) = dispatch(&state, other, arg) {
                    println!("error: {e}");
                    continue;
                }
                print_state(&state);
            }
        }
    }

    if state.read().unsaved_changes {
        tracing::warn!("Exiting with unsaved settings changes");
    }
    Ok(())
}

fn dispatch(state: &SharedSettings, command: &str, arg: &str) -> Result<()> {
    match command {
        "preset" => {
            let index = arg
                .trim()
                .parse::<u8>()
                .map_err(|_| AppError::Validation(format!("not a preset index: {arg:?}")))?;
            handlers::handle_preset_click(state, Preset::try_from(index)?);
        }
        "slippage" => report(handlers::handle_slippage_input(state, arg).accepted),
        "deadline" => report(handlers::handle_deadline_input(state, arg).accepted),
        "gwei" => report(handlers::handle_gas_input(state, arg).accepted),
        "gas" => {
            if !handlers::handle_gas_tier_click(state, parse_tier(arg)?) {
                println!("(gas tiers are only available on mainnet)");
            }
        }
        "gas-clear" => {
            handlers::handle_gas_tier_double_click(state, parse_tier(arg)?);
        }
        "multihop" => {
            handlers::handle_multihop_toggle(state);
        }
        "network" => handlers::handle_network_change(state, arg.trim() == "mainnet"),
        "blur" => {
            handlers::handle_slippage_blur(state);
            handlers::handle_deadline_blur(state);
            handlers::handle_gas_blur(state);
        }
        "show" => {}
        "save" => handlers::handle_settings_save(state)?,
        "reset" => handlers::handle_settings_reset(state),
        other => {
            return Err(AppError::Validation(format!(
                "unknown command {other:?}, try `help`"
            )))
        }
    }
    Ok(())
}

fn parse_tier(arg: &str) -> Result<GasPriceTier> {
    arg.trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("not a gas tier: {arg:?}")))
}

fn report(accepted: bool) {
    if !accepted {
        println!("(input ignored)");
    }
}

fn print_state(state: &SharedSettings) {
    let s = state.read();
    let settings = s.snapshot();

    let mut out = io::stdout().lock();
    let _ = writeln!(
        out,
        "slippage {}% [slot {}] box={:?}{}",
        s.slippage.tolerance_percent(),
        s.slippage.active_index(),
        s.slippage.custom_text(),
        s.slippage
            .warning()
            .map(|w| format!(" ! {}", w.message()))
            .unwrap_or_default(),
    );
    let _ = writeln!(
        out,
        "deadline {} min ({}s) box={:?}{}",
        s.deadline.deadline_minutes(),
        settings.deadline_seconds,
        s.deadline.input_text(),
        s.deadline
            .warning()
            .map(|w| format!(" ! {}", w.message()))
            .unwrap_or_default(),
    );
    let _ = writeln!(
        out,
        "gas {:?} box={:?}{} | multihop {} | mainnet {}{}",
        settings.preferred_gas_price,
        s.gas.input_text(),
        s.gas
            .warning(None)
            .map(|w| format!(" ! {}", w.message()))
            .unwrap_or_default(),
        settings.multihop,
        s.gas.is_mainnet(),
        if s.unsaved_changes { " (unsaved)" } else { "" },
    );
}
