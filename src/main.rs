//! Build icon fonts, stylesheets and previews from a directory of SVG icons.

use iconforge::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
