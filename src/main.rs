use std::path::PathBuf;

use log::debug;
use resgamma::prompt::Console;
use resgamma::{Gamma, PrimaryDisplay, Resolution, ResolutionStore, SessionConfig};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "resgamma", about = "Switch the display resolution and gamma ramp interactively")]
struct Opt {
    /// File holding the preferred resolutions
    #[structopt(short, long, parse(from_os_str), default_value = "resolutions.json")]
    file: PathBuf,

    /// Resolution applied when the chosen one is already active
    #[structopt(long, default_value = "1920x1080")]
    fallback: Resolution,

    /// Gamma selected by answering 0 at the gamma prompt
    #[structopt(long, default_value = "1.5")]
    gamma_preset: Gamma,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let opt = Opt::from_args();
    debug!("{:?}", opt);

    let config = SessionConfig {
        store: ResolutionStore::new(opt.file),
        fallback: opt.fallback,
        gamma_preset: opt.gamma_preset,
    };

    let result = {
        let mut display = PrimaryDisplay::open()?;
        let mut console = Console::stdio();
        config.run(&mut display, &mut console)
        // the screen device context is released here
    };

    match result {
        Ok(outcome) => {
            debug!("{:?}", outcome);
            Ok(())
        }
        Err(err) if err.is_invalid_input() => {
            println!("{}", err);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
