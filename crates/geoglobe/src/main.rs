use clap::Parser;

use geoglobe::cli::Cli;

fn main() -> geoglobe::Result<()> {
    geoglobe::init_logging();

    let cli = Cli::parse();
    let options = cli.options()?;
    let scene = geoglobe::build_scene(&options)?;

    match &cli.screenshot {
        Some(path) => {
            geoglobe::render_to_file(&scene, &options, path, options.window.width, options.window.height)
        }
        None => geoglobe::show(scene, options),
    }
}
