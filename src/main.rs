// SPDX-License-Identifier: MPL-2.0
use iced_apod::app::{self, paths, Flags};

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        start: args.opt_value_from_str("--start").unwrap_or_else(|err| {
            log::warn!("Ignoring --start: {err}");
            None
        }),
        end: args.opt_value_from_str("--end").unwrap_or_else(|err| {
            log::warn!("Ignoring --end: {err}");
            None
        }),
        config_dir: args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
            log::warn!("Ignoring --config-dir: {err}");
            None
        }),
        api_key: args.opt_value_from_str("--api-key").unwrap_or_else(|err| {
            log::warn!("Ignoring --api-key: {err}");
            None
        }),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Unused arguments: {rest:?}");
    }

    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}
