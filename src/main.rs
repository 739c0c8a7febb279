use iced_bites::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
iced_bites - swipe through restaurants near you

USAGE:
  iced_bites [OPTIONS]

OPTIONS:
  --lang <LOCALE>      Locale override in BCP-47 form (e.g. de, en-US)
  --config-dir <DIR>   Directory holding settings.toml
  --data-dir <DIR>     Directory holding persisted state
  -h, --help           Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap(),
        config_dir: args.opt_value_from_str("--config-dir").unwrap(),
        data_dir: args.opt_value_from_str("--data-dir").unwrap(),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("iced_bites=info,wgpu_core=warn,wgpu_hal=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    app::run(flags)
}
