mod cli;

fn main() -> anyhow::Result<()> {
    let command_line_interface = cli::CommandLineInterface::load();
    let default_filter = if command_line_interface.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
    log::debug!("{command_line_interface:?}");
    command_line_interface.run()
}
