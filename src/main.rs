fn main() {
    if let Err(err) = kle_svg_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
