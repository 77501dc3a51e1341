use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "m2i")]
#[command(about = "Move saved Medium bookmarks into an Instapaper folder", long_about = None)]
pub struct Cli {
    /// Defaults to `migrate` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add every bookmark in a Medium export to an Instapaper folder
    Migrate(MigrateArgs),

    /// List the bookmarks a Medium export contains, without contacting Instapaper
    Extract {
        /// Path to the Medium export archive (overrides MEDIUM_ZIP_NAME)
        #[arg(long)]
        archive: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the folders in the Instapaper account
    Folders {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct MigrateArgs {
    /// Path to the Medium export archive (overrides MEDIUM_ZIP_NAME)
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Destination folder title (overrides INSTAPAPER_MEDIUM_FOLDER)
    #[arg(long)]
    pub folder: Option<String>,

    /// Directory for succeed.csv and failed.csv (overrides M2I_REPORT_DIR)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["m2i"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[rstest]
    fn migrate_overrides() {
        let cli = Cli::try_parse_from([
            "m2i", "migrate", "--archive", "export.zip", "--folder", "Saved", "--out-dir", "out",
            "--json",
        ])
        .unwrap();
        let Some(Commands::Migrate(args)) = cli.command else {
            panic!("expected migrate");
        };
        assert_eq!(args.archive, Some(PathBuf::from("export.zip")));
        assert_eq!(args.folder.as_deref(), Some("Saved"));
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert!(args.json);
    }

    #[rstest]
    #[case::extract(&["m2i", "extract", "--json"])]
    #[case::folders(&["m2i", "folders"])]
    fn other_subcommands_parse(#[case] argv: &[&str]) {
        assert!(Cli::try_parse_from(argv).is_ok());
    }

    #[rstest]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["m2i", "extract", "--folder", "x"]).is_err());
    }
}
