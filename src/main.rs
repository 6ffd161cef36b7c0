use clap::Parser;
use gbk_tables::cli::Args;
use gbk_tables::commands;
use gbk_tables::config::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = Config::resolve(args.config.as_deref())
        .and_then(|config| commands::convert::run(&args.inputs, &args.output_dir, &config));

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
