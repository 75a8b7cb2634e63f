use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod launcher;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the session length, in seconds
    #[arg(short, long)]
    duration: Option<u32>,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let query = utils::QueryParams::from_location();
    let root = document()
        .get_element_by_id("app")
        .expect("Could not find id=\"app\" element");

    match query.variant() {
        Some(variant) => {
            log::debug!("starting {}", variant.display_name());
            let props = game::GameProps {
                variant,
                seed: args.seed,
                duration: args.duration,
                mainpage_url: query.mainpage_url.map(Into::into),
            };
            yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
        }
        None => {
            log::debug!("no game selected, showing launcher");
            yew::Renderer::<launcher::LauncherView>::with_root(root).render();
        }
    }
}
