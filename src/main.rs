use clap::Parser;
use miette::Result;
use dradis::cli::{logging, Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    logging::init(global.verbose, global.quiet);

    match cli.command {
        Commands::Project(cmd) => dradis::cli::commands::project::run(cmd, &global),
        Commands::Team(cmd) => dradis::cli::commands::team::run(cmd, &global),
        Commands::Node(cmd) => dradis::cli::commands::node::run(cmd, &global),
        Commands::Issue(cmd) => dradis::cli::commands::issue::run(cmd, &global),
        Commands::Evidence(cmd) => dradis::cli::commands::evidence::run(cmd, &global),
        Commands::Note(cmd) => dradis::cli::commands::note::run(cmd, &global),
        Commands::Attachment(cmd) => dradis::cli::commands::attachment::run(cmd, &global),
        Commands::Issuelib(cmd) => dradis::cli::commands::issuelib::run(cmd, &global),
        Commands::Config(cmd) => dradis::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => dradis::cli::commands::completions::run(args),
    }
}
