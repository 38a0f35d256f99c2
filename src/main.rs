fn main() {
    if let Err(err) = insightbridge::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
