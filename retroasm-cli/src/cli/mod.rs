mod assemble;
mod dump;
mod version;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use retroasm_common::{cst::LOGO, env};

use crate::logging::{CustomEnvFilter, CustomEnvFilterParser};

const INFO: &str = r"
retroasm toolkit command-line interface
";

#[derive(Parser, Debug)]
#[command(name = "retroasm command-line interface", bin_name = "retroasm-cli")]
#[command(author, version, about = INFO, before_help = LOGO)]
#[command(disable_version_flag = true, arg_required_else_help = true)]
struct Cli {
	#[arg(help = "The logging level")]
	#[arg(env = "RETROASM_LOG", short = 'l', long = "log")]
	#[arg(default_value = "info")]
	#[arg(value_parser = CustomEnvFilterParser::new())]
	#[arg(global = true)]
	log: CustomEnvFilter,

	#[command(subcommand)]
	command: Option<Commands>,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "Assemble a source program into a target ROM image")]
	Assemble(assemble::AssembleCommandArguments),
	#[command(about = "Dump information from ROM images and assets", subcommand)]
	Dump(dump::Commands),
	#[command(about = "Print version information")]
	Version,
}

pub(crate) fn prepare(log: CustomEnvFilter) -> Option<tracing_appender::non_blocking::WorkerGuard> {
	crate::logging::builder()
		.with_filter(log)
		.with_file_appender(std::path::PathBuf::from(".logs"))
		.build()
}

pub async fn init() -> ExitCode {
	env::init();

	let args = Cli::parse();

	// version command is special
	if let Some(Commands::Version) = args.command {
		version::init();
		return ExitCode::SUCCESS;
	}

	let _guard = prepare(args.log);

	let output = match args.command {
		Some(Commands::Assemble(args)) => assemble::exec(args).await,
		Some(Commands::Dump(args)) => dump::exec(args).await,
		_ => Ok(()),
	};

	if let Err(e) = output {
		error!("{}", e);
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}
