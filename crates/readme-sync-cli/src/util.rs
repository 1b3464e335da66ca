use clap::{Arg, ArgMatches, Command};

#[derive(Clone, Copy, Debug, Default)]
pub struct Verbosity {
    pub json: bool,
    pub verbose: bool,
}

/// Adds the repository flags shared by `sync` and `check`.
pub fn with_repository_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("repo-url")
                .long("repo-url")
                .value_name("URL")
                .help("Repository URL ending in <owner>/<name>. Defaults to the config file, then package.json."),
        )
        .arg(
            Arg::new("branch")
                .long("branch")
                .value_name("NAME")
                .help("Default branch used in badge links. Defaults to the config file, then 'main'."),
        )
}

pub fn repository_args(matches: &ArgMatches) -> (Option<String>, Option<String>) {
    (
        matches.get_one::<String>("repo-url").cloned(),
        matches.get_one::<String>("branch").cloned(),
    )
}
