use clap::Subcommand;

use crate::err::Error;

mod chr;
mod rom;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
	#[command(about = "dump CHR-ROM tile data as an image")]
	Chr(chr::ChrCommandArguments),
	#[command(about = "dump a ROM container header")]
	Rom(rom::RomCommandArguments),
}

pub(crate) async fn exec(command: Commands) -> Result<(), Error> {
	match command {
		Commands::Chr(args) => chr::exec(args).await,
		Commands::Rom(args) => rom::exec(args).await,
	}
}
