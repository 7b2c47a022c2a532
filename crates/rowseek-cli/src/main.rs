use clap::Parser;
use rowseek_cli::{logging, run, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}
