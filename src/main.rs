fn main() {
    if let Err(err) = popup_placer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
