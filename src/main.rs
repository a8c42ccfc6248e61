// SPDX-License-Identifier: MPL-2.0
use keepsake::app::{self, Flags};
use std::path::PathBuf;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        config_path: args.opt_value_from_str("--config").unwrap_or(None),
        images_dir: args.finish().into_iter().next().map(PathBuf::from),
    };

    app::run(flags)
}
