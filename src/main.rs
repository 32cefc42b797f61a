use clap::Parser;
use tracing::error;

use joltic::{
    app::{self, App},
    cli::Args,
    context::AppContext,
    logging::{self, LogOptions},
    prompt,
};

fn main() {
    let args = Args::parse();
    let ctx = AppContext::new();

    logging::init(
        ctx.as_ref().ok(),
        LogOptions {
            verbose: args.verbose,
            console: !args.quiet,
        },
    );

    let code = match ctx {
        Ok(ctx) => {
            let mut prompter = prompt::for_terminal(args.plain);
            let mut stdout = std::io::stdout();
            App::new(ctx, prompter.as_mut(), &mut stdout)
                .run(&args)
                .unwrap_or_else(|err| {
                    error!("{err:#}");
                    app::exit_code(&err)
                })
        }
        Err(err) => {
            error!("{err}");
            err.exit_code()
        }
    };

    std::process::exit(code);
}
