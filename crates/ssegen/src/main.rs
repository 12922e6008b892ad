//! `ssegen` - generate typed server-sent event enums from OpenAPI.

fn main() {
    ssegen_cli::init_tracing();
    std::process::exit(ssegen_cli::run(std::env::args_os()));
}
